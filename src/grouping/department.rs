// Department grouping: first word of the lesson name.

use super::traits::GroupingStrategy;
use super::{department_key, Group, GroupSet};
use crate::catalogue::Lesson;

/// Groups "Physics 101" and "Physics 201" under "Physics". Single-word
/// names go to the catch-all group.
pub struct DepartmentGrouping {
    pub catch_all: String,
}

impl Default for DepartmentGrouping {
    fn default() -> Self {
        Self {
            catch_all: "Other".to_string(),
        }
    }
}

impl GroupingStrategy for DepartmentGrouping {
    fn name(&self) -> &'static str {
        "department"
    }

    fn group(&self, lessons: &[Lesson]) -> Vec<Group> {
        let mut set = GroupSet::default();
        for lesson in lessons {
            let key = department_key(&lesson.name).unwrap_or(self.catch_all.as_str());
            set.add(key, &lesson.name);
        }
        set.into_groups()
    }
}
