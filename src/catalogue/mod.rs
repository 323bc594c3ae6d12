// Skill catalogue: the in-memory form of the upstream skill-list contract.

pub mod models;
pub mod parse;

pub use models::{Catalogue, Institution, Lesson};
pub use parse::{parse_contract, parse_institution_map, parse_lesson_map, RESERVED_KEYS};
