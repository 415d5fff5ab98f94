use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use issuelink_core::body::compose_body;
use issuelink_core::{Commit, IssuePattern};

fn generate_commits(count: usize) -> Vec<Commit> {
    let templates = [
        "fix: handle empty payload (#{})",
        "feat: add retry budget, closes #{}",
        "Revert \"feat: experimental cache #{}\"",
        "chore: bump dependencies",
        "docs: mention #{} and #{} in the README",
    ];

    (0..count)
        .map(|i| {
            let template = templates[i % templates.len()];
            let message = template.replace("{}", &(i % 250).to_string());
            Commit::new(format!("{:040x}", i), message)
        })
        .collect()
}

fn bench_pattern_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_compilation");

    for (source, name) in [
        (r"#(\d+)", "hash_number"),
        (r"(?i)(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?) #(\d+)", "closing_keywords"),
        (r"[A-Z]+-(\d+)", "tracker_key"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &source, |b, source| {
            b.iter(|| IssuePattern::new(black_box(*source)));
        });
    }

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let pattern = IssuePattern::new(r"#(\d+)").expect("valid pattern");

    // GitHub lists at most 250 commits per pull request
    for count in [10, 100, 250] {
        let commits = generate_commits(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &commits, |b, commits| {
            b.iter(|| pattern.extract(black_box(commits)));
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let pattern = IssuePattern::new(r"#(\d+)").expect("valid pattern");
    let issues = pattern.extract(&generate_commits(250));
    let body = format!(
        "{}\r\n## Linked Issues\r\n{}",
        "Long description line.\r\n".repeat(200),
        "old list\r\n".repeat(50)
    );

    c.bench_function("compose_body_section", |b| {
        b.iter(|| compose_body(black_box(Some(body.as_str())), "## Linked Issues", &issues));
    });
}

criterion_group!(benches, bench_pattern_compilation, bench_extraction, bench_compose);
criterion_main!(benches);
