// Skill-list sources: where the catalogue comes from.
//
// The analysis never reaches into extraction or storage directly; it asks a
// SkillSource for a complete catalogue snapshot.

pub mod file;
pub mod http;
pub mod memory;
pub mod traits;

pub use file::JsonFileSource;
pub use http::HttpSkillSource;
pub use memory::StaticSource;
pub use traits::SkillSource;
