// Peer grouping: partitions lessons into departments or semesters.
//
// Grouping is heuristic, so it sits behind the GroupingStrategy trait and
// the similarity/coherence stages never depend on a concrete strategy.

pub mod department;
pub mod semester;
pub mod traits;

use std::collections::HashMap;

use serde::Serialize;

pub use department::DepartmentGrouping;
pub use semester::SemesterGrouping;
pub use traits::GroupingStrategy;

/// A peer set of lessons, in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    pub members: Vec<String>,
}

impl Group {
    /// Groups with a single member have nothing to be compared against.
    pub fn is_comparable(&self) -> bool {
        self.members.len() >= 2
    }
}

/// Accumulates groups keyed by name while keeping first-seen order.
#[derive(Debug, Default)]
pub(crate) struct GroupSet {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupSet {
    pub(crate) fn add(&mut self, key: &str, lesson: &str) {
        match self.index.get(key) {
            Some(&i) => self.groups[i].members.push(lesson.to_string()),
            None => {
                self.index.insert(key.to_string(), self.groups.len());
                self.groups.push(Group {
                    key: key.to_string(),
                    members: vec![lesson.to_string()],
                });
            }
        }
    }

    pub(crate) fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}

/// First whitespace token of a multi-word lesson name.
pub(crate) fn department_key(lesson_name: &str) -> Option<&str> {
    let mut parts = lesson_name.split_whitespace();
    let first = parts.next()?;
    parts.next().map(|_| first)
}
