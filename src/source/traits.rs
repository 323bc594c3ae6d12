// Skill source trait: the data-provider seam.
//
// Any provider that can return the skill-list contract plugs in here: a
// JSON export, the extraction service over HTTP, or a fixed in-memory
// catalogue in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::catalogue::Catalogue;

#[async_trait]
pub trait SkillSource: Send + Sync {
    /// Fetch one complete snapshot of the catalogue.
    ///
    /// Structural problems with the payload surface as `MalformedInput`
    /// inside the returned error.
    async fn fetch(&self) -> Result<Catalogue>;

    /// Where the data comes from, for log lines and report headers.
    fn describe(&self) -> String;
}
