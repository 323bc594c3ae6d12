// Lessons, institutions, and the catalogue that holds them.
//
// Everything here is built once per run from the input contract and is
// never mutated afterwards.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A single course/unit and the skills extracted for it.
///
/// `skills` keeps upstream order and may contain incidental duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    pub skills: Vec<String>,
}

impl Lesson {
    pub fn new(name: impl Into<String>, skills: &[&str]) -> Self {
        Self {
            name: name.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The lesson's skills joined into one text document for vectorization.
    pub fn skill_document(&self) -> String {
        self.skills.join(" ")
    }
}

/// The lessons of one institution, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// `university_name` metadata, or the key of an institution-scoped map
    pub name: Option<String>,
    /// `university_country` metadata, when supplied
    pub country: Option<String>,
    pub lessons: Vec<Lesson>,
}

impl Institution {
    pub fn lesson(&self, name: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.name == name)
    }

    /// Human-readable label for report headers.
    pub fn label(&self) -> String {
        match (&self.name, &self.country) {
            (Some(name), Some(country)) => format!("{name} ({country})"),
            (Some(name), None) => name.clone(),
            (None, Some(country)) => format!("Unnamed institution ({country})"),
            (None, None) => "Unnamed institution".to_string(),
        }
    }
}

/// One snapshot of the skill-list contract, possibly spanning institutions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    pub institutions: Vec<Institution>,
}

impl Catalogue {
    pub fn single(institution: Institution) -> Self {
        Self {
            institutions: vec![institution],
        }
    }

    /// Select an institution by name, or the first one when `name` is None.
    pub fn institution(&self, name: Option<&str>) -> Result<&Institution> {
        match name {
            None => self
                .institutions
                .first()
                .ok_or_else(|| anyhow::anyhow!("Catalogue contains no institutions")),
            Some(wanted) => self
                .institutions
                .iter()
                .find(|i| i.name.as_deref() == Some(wanted))
                .ok_or_else(|| {
                    let known: Vec<&str> = self
                        .institutions
                        .iter()
                        .filter_map(|i| i.name.as_deref())
                        .collect();
                    anyhow::anyhow!(
                        "Institution '{wanted}' not found in catalogue (known: {})",
                        if known.is_empty() {
                            "none".to_string()
                        } else {
                            known.join(", ")
                        }
                    )
                }),
        }
    }

    pub fn lesson_count(&self) -> usize {
        self.institutions.iter().map(|i| i.lessons.len()).sum()
    }
}
