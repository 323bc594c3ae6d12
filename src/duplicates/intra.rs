// Intra-lesson duplicates: the same skill listed twice for one lesson.
//
// Matching is exact and case-sensitive: "Sets" and "sets" are different
// skills here. Each repeated skill is reported once per lesson, in order of
// first appearance.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalogue::Lesson;

/// A skill listed more than once within one lesson.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateSkill {
    pub skill: String,
    /// Total times the skill appears in the lesson (always >= 2)
    pub occurrences: usize,
    /// Redundant copies: occurrences - 1
    pub duplicate_count: usize,
}

/// Duplicate findings for one lesson. Empty when the lesson is clean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonDuplicates {
    pub lesson: String,
    pub duplicates: Vec<DuplicateSkill>,
}

impl LessonDuplicates {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Redundant copies of `skill`, or None when it is not duplicated.
    pub fn count_for(&self, skill: &str) -> Option<usize> {
        self.duplicates
            .iter()
            .find(|d| d.skill == skill)
            .map(|d| d.duplicate_count)
    }
}

/// Scan one lesson's skills left to right, counting each distinct skill.
pub fn find_in_lesson(lesson: &Lesson) -> LessonDuplicates {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for skill in &lesson.skills {
        let count = counts.entry(skill.as_str()).or_insert(0);
        if *count == 0 {
            order.push(skill.as_str());
        }
        *count += 1;
    }

    let duplicates = order
        .into_iter()
        .filter_map(|skill| {
            let occurrences = counts[skill];
            (occurrences > 1).then(|| DuplicateSkill {
                skill: skill.to_string(),
                occurrences,
                duplicate_count: occurrences - 1,
            })
        })
        .collect();

    LessonDuplicates {
        lesson: lesson.name.clone(),
        duplicates,
    }
}

/// One entry per lesson, in input order, clean lessons included.
pub fn find_intra_lesson(lessons: &[Lesson]) -> Vec<LessonDuplicates> {
    lessons.iter().map(find_in_lesson).collect()
}
