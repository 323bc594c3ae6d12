// JSON file source: reads an exported skill-list contract from disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::traits::SkillSource;
use crate::catalogue::{parse_contract, Catalogue};

pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SkillSource for JsonFileSource {
    async fn fetch(&self) -> Result<Catalogue> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read skill file {}", self.path.display()))?;

        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", self.path.display()))?;

        let catalogue = parse_contract(&value)
            .with_context(|| format!("Unexpected skill-list shape in {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            institutions = catalogue.institutions.len(),
            lessons = catalogue.lesson_count(),
            "Loaded skill file"
        );

        Ok(catalogue)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
