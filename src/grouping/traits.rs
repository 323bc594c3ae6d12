// Grouping strategy trait: swap-ready abstraction.
//
// The default strategies are name heuristics. A strategy backed by explicit
// program-structure metadata can replace them without touching the
// similarity or coherence stages.

use super::Group;
use crate::catalogue::Lesson;

/// Partitions lessons into peer groups.
///
/// Every lesson lands in exactly one group and every returned group has at
/// least one member. Group order follows first appearance in `lessons`.
pub trait GroupingStrategy: Send + Sync {
    /// Short identifier shown in reports (e.g. "department").
    fn name(&self) -> &'static str;

    fn group(&self, lessons: &[Lesson]) -> Vec<Group>;
}
