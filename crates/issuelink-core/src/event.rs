//! GitHub event payload parsing
//!
//! Only the fields needed to address a pull request are read; everything
//! else in the payload is ignored.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawPayload {
    repository: Option<RawRepository>,
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    owner: RawOwner,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
}

/// The pull request a workflow run was triggered for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPayload {
    /// `repository.owner.login`
    pub owner: String,
    /// `repository.name`
    pub repo: String,
    /// `number`; absent for events that are not about a pull request
    pub pull_number: Option<u64>,
}

impl EventPayload {
    /// Parse a payload from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPayload = serde_json::from_str(json)
            .map_err(|e| Error::EventParse(format!("invalid event payload: {}", e)))?;

        let repository = raw
            .repository
            .ok_or_else(|| Error::EventParse("payload has no repository".to_string()))?;

        Ok(Self {
            owner: repository.owner.login,
            repo: repository.name,
            pull_number: raw.number,
        })
    }

    /// Read and parse the payload file GitHub Actions writes for each run
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::EventParse(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Read the payload named by `GITHUB_EVENT_PATH`
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("GITHUB_EVENT_PATH")
            .map_err(|_| Error::Config("GITHUB_EVENT_PATH not set".to_string()))?;
        Self::from_path(Path::new(&path))
    }
}
