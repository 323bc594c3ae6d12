// In-memory source: serves a fixed catalogue.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::traits::SkillSource;
use crate::catalogue::{parse_contract, Catalogue};

pub struct StaticSource {
    catalogue: Catalogue,
}

impl StaticSource {
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }

    /// Build from a JSON value in either contract shape.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self::new(parse_contract(value)?))
    }
}

#[async_trait]
impl SkillSource for StaticSource {
    async fn fetch(&self) -> Result<Catalogue> {
        Ok(self.catalogue.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalogue ({} lessons)", self.catalogue.lesson_count())
    }
}
