// Semester grouping: "semester N" / "term N" in the lesson name.
//
// Lessons without a semester marker fall back to the department heuristic
// with an "Uncategorized" catch-all, whether or not any other lesson in the
// set carries a marker. The result is empty only for an empty lesson list.

use anyhow::Result;
use regex_lite::Regex;
use tracing::debug;

use super::traits::GroupingStrategy;
use super::{department_key, Group, GroupSet};
use crate::catalogue::Lesson;

const SEMESTER_PATTERN: &str = r"(?i)(?:semester|term)\s*(\d+)";

pub struct SemesterGrouping {
    pattern: Regex,
    pub catch_all: String,
}

impl SemesterGrouping {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(SEMESTER_PATTERN)?,
            catch_all: "Uncategorized".to_string(),
        })
    }

    /// "Semester N" when the lesson name carries a semester or term marker.
    pub fn semester_key(&self, lesson_name: &str) -> Option<String> {
        self.pattern
            .captures(lesson_name)
            .and_then(|caps| caps.get(1))
            .map(|n| format!("Semester {}", n.as_str()))
    }
}

impl GroupingStrategy for SemesterGrouping {
    fn name(&self) -> &'static str {
        "semester"
    }

    fn group(&self, lessons: &[Lesson]) -> Vec<Group> {
        let mut set = GroupSet::default();
        let mut marked = 0usize;
        for lesson in lessons {
            match self.semester_key(&lesson.name) {
                Some(semester) => {
                    marked += 1;
                    set.add(&semester, &lesson.name);
                }
                None => {
                    let dept = department_key(&lesson.name).unwrap_or(self.catch_all.as_str());
                    set.add(dept, &lesson.name);
                }
            }
        }
        if marked == 0 && !lessons.is_empty() {
            debug!(
                lessons = lessons.len(),
                "No semester markers found, grouped by department"
            );
        }
        set.into_groups()
    }
}
