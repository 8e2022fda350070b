//! services/api/src/fixtures.rs
//!
//! Loads the catalog and user the process starts with: either a JSON seed
//! document named in the configuration or the built-in fixtures.

use std::collections::HashSet;
use std::path::Path;

use edustream_core::domain::{Course, User};
use edustream_core::fixtures::{seed_courses, seed_user};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read seed document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed seed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid seed data: {0}")]
    Invalid(String),
}

/// `{ "courses": [...], "user": {...} }` in the same camelCase shape the
/// browser client uses.
#[derive(Debug, Deserialize)]
pub struct SeedDocument {
    pub courses: Vec<Course>,
    pub user: User,
}

impl SeedDocument {
    pub fn builtin() -> Self {
        Self { courses: seed_courses(), user: seed_user() }
    }

    /// Every course must have lessons, a non-negative price, a rating within
    /// 0..=5 and an id no other course uses.
    fn validate(self) -> Result<Self, FixtureError> {
        {
            let mut seen = HashSet::new();
            for course in &self.courses {
                if !seen.insert(course.id.as_str()) {
                    return Err(FixtureError::Invalid(format!("duplicate course id {}", course.id)));
                }
                if !course.is_well_formed() {
                    return Err(FixtureError::Invalid(format!(
                        "course {} needs at least one video, a price >= 0 and a rating in 0..=5",
                        course.id
                    )));
                }
            }
        }
        Ok(self)
    }
}

pub fn parse_seed(json: &str) -> Result<SeedDocument, FixtureError> {
    serde_json::from_str::<SeedDocument>(json)?.validate()
}

/// Reads the seed document at `path`, or falls back to the built-in fixtures.
pub fn load_seed(path: Option<&Path>) -> Result<SeedDocument, FixtureError> {
    match path {
        Some(path) => {
            info!("Loading seed document from {}", path.display());
            let json = std::fs::read_to_string(path)?;
            parse_seed(&json)
        }
        None => {
            info!("No FIXTURES_PATH set, using built-in fixtures");
            Ok(SeedDocument::builtin())
        }
    }
}
