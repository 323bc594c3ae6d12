// Cross-lesson duplicates: skills taught in two or more distinct lessons.
//
// The SkillOccurrenceIndex maps each skill to the distinct lessons it
// appears in. Repeats within one lesson count once toward the lesson total,
// so {A, A, B} is two lessons. The raw occurrence count is kept alongside,
// which surfaces skills that are disproportionately repeated.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalogue::{Catalogue, Institution};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillOccurrences {
    pub skill: String,
    /// Distinct lesson names, first-seen order
    pub lessons: Vec<String>,
    /// Every appearance, repeats within a lesson included
    pub occurrences: usize,
}

/// A skill found in at least two distinct lessons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossLessonDuplicate {
    pub skill: String,
    pub lessons: Vec<String>,
    pub occurrences: usize,
}

impl CrossLessonDuplicate {
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}

/// Skill → lessons index, rebuilt from scratch for every run.
#[derive(Debug, Default)]
pub struct SkillOccurrenceIndex {
    entries: Vec<SkillOccurrences>,
    index: HashMap<String, usize>,
}

impl SkillOccurrenceIndex {
    /// Record one appearance of `skill` in `lesson`.
    pub fn record(&mut self, skill: &str, lesson: &str) {
        let i = match self.index.get(skill) {
            Some(&i) => i,
            None => {
                self.index.insert(skill.to_string(), self.entries.len());
                self.entries.push(SkillOccurrences {
                    skill: skill.to_string(),
                    lessons: Vec::new(),
                    occurrences: 0,
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[i];
        entry.occurrences += 1;
        if !entry.lessons.iter().any(|l| l == lesson) {
            entry.lessons.push(lesson.to_string());
        }
    }

    /// Index the lessons of a single institution.
    pub fn from_institution(institution: &Institution) -> Self {
        let mut index = Self::default();
        for lesson in &institution.lessons {
            for skill in &lesson.skills {
                index.record(skill, &lesson.name);
            }
        }
        index
    }

    /// Index a whole catalogue, or only the institution named by `scope`.
    ///
    /// Lesson names are qualified as "Institution / Lesson" when more than one
    /// institution is in scope, so equally named lessons stay distinct.
    pub fn from_catalogue(catalogue: &Catalogue, scope: Option<&str>) -> Self {
        let in_scope: Vec<&Institution> = catalogue
            .institutions
            .iter()
            .filter(|i| scope.is_none() || i.name.as_deref() == scope)
            .collect();
        let qualify = in_scope.len() > 1;

        let mut index = Self::default();
        for (n, institution) in in_scope.iter().enumerate() {
            let prefix = institution
                .name
                .clone()
                .unwrap_or_else(|| format!("Institution {}", n + 1));
            for lesson in &institution.lessons {
                let name = if qualify {
                    format!("{prefix} / {}", lesson.name)
                } else {
                    lesson.name.clone()
                };
                for skill in &lesson.skills {
                    index.record(skill, &name);
                }
            }
        }
        index
    }

    pub fn lessons_for(&self, skill: &str) -> Option<&[String]> {
        self.index
            .get(skill)
            .map(|&i| self.entries[i].lessons.as_slice())
    }

    pub fn occurrences(&self) -> &[SkillOccurrences] {
        &self.entries
    }

    /// Number of distinct skills indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Skills in two or more distinct lessons, most widespread first.
    /// Ties keep first-seen order.
    pub fn duplicated(&self) -> Vec<CrossLessonDuplicate> {
        let mut found: Vec<CrossLessonDuplicate> = self
            .entries
            .iter()
            .filter(|e| e.lessons.len() >= 2)
            .map(|e| CrossLessonDuplicate {
                skill: e.skill.clone(),
                lessons: e.lessons.clone(),
                occurrences: e.occurrences,
            })
            .collect();
        found.sort_by(|a, b| b.lessons.len().cmp(&a.lessons.len()));
        found
    }
}
