#![no_main]
use issuelink_core::EventPayload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = EventPayload::from_json(s);
    }
});
