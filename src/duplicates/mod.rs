// Duplicate skill detection.
//
// Two independent passes over the ungrouped catalogue: repeats inside a
// single lesson, and skills taught in several distinct lessons. They share
// no state and are only combined by the report aggregator.

pub mod cross;
pub mod intra;

pub use cross::{CrossLessonDuplicate, SkillOccurrenceIndex};
pub use intra::{find_intra_lesson, DuplicateSkill, LessonDuplicates};
