// Report aggregation: merges group coherence and duplicate findings.
//
// The aggregator computes nothing new. It keeps every group the classifier
// produced, in classifier order, and records why a group was not analyzed.

use serde::Serialize;
use tracing::debug;

use crate::catalogue::Institution;
use crate::duplicates::{CrossLessonDuplicate, LessonDuplicates};
use crate::error::AnalysisError;
use crate::grouping::Group;
use crate::scoring::coherence::{Anomaly, GroupCoherence};
use crate::similarity::keywords::GroupKeyword;

/// What happened to one group during the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupStatus {
    Analyzed(GroupCoherence),
    /// Skill documents had no usable tokens
    NoVocabulary,
    /// Single member, nothing to compare
    TooSmall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub key: String,
    pub members: Vec<String>,
    pub status: GroupStatus,
    pub keywords: Vec<GroupKeyword>,
}

impl GroupReport {
    pub fn coherence(&self) -> Option<&GroupCoherence> {
        match &self.status {
            GroupStatus::Analyzed(c) => Some(c),
            _ => None,
        }
    }
}

/// Per-group result handed to the aggregator by the pipeline.
#[derive(Debug, Clone)]
pub enum GroupOutcome {
    Analyzed {
        group: Group,
        coherence: GroupCoherence,
        keywords: Vec<GroupKeyword>,
    },
    Skipped {
        group: Group,
        reason: AnalysisError,
    },
}

/// Full analysis result for one institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub institution: Option<String>,
    pub country: Option<String>,
    /// Name of the grouping strategy used
    pub grouping: String,
    pub lesson_count: usize,
    pub groups: Vec<GroupReport>,
    pub anomalies: Vec<Anomaly>,
    pub intra_lesson: Vec<LessonDuplicates>,
    pub cross_lesson: Vec<CrossLessonDuplicate>,
    /// Data-quality notes (groups skipped for lack of vocabulary, etc.)
    pub notes: Vec<String>,
}

impl AnalysisReport {
    /// Group key → coherence score for every analyzed group, in group order.
    pub fn group_scores(&self) -> Vec<(&str, f64)> {
        self.groups
            .iter()
            .filter_map(|g| g.coherence().map(|c| (g.key.as_str(), c.group_score)))
            .collect()
    }

    pub fn group(&self, key: &str) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn analyzed_group_count(&self) -> usize {
        self.groups.iter().filter(|g| g.coherence().is_some()).count()
    }

    /// Intra-lesson findings with at least one duplicate.
    pub fn lessons_with_duplicates(&self) -> impl Iterator<Item = &LessonDuplicates> {
        self.intra_lesson.iter().filter(|l| !l.is_clean())
    }

    pub fn institution_label(&self) -> String {
        Institution {
            name: self.institution.clone(),
            country: self.country.clone(),
            lessons: Vec::new(),
        }
        .label()
    }
}

/// Merge per-group outcomes and duplicate findings into one report.
pub fn aggregate(
    institution: &Institution,
    grouping: &str,
    outcomes: Vec<GroupOutcome>,
    intra_lesson: Vec<LessonDuplicates>,
    cross_lesson: Vec<CrossLessonDuplicate>,
) -> AnalysisReport {
    let mut groups = Vec::with_capacity(outcomes.len());
    let mut anomalies = Vec::new();
    let mut notes = Vec::new();

    for outcome in outcomes {
        match outcome {
            GroupOutcome::Analyzed {
                group,
                coherence,
                keywords,
            } => {
                anomalies.extend(coherence.anomalies.iter().cloned());
                groups.push(GroupReport {
                    key: group.key,
                    members: group.members,
                    status: GroupStatus::Analyzed(coherence),
                    keywords,
                });
            }
            GroupOutcome::Skipped { group, reason } => {
                let status = match &reason {
                    AnalysisError::NoVocabulary { .. } => {
                        notes.push(format!("Group '{}' not analyzed: {reason}", group.key));
                        GroupStatus::NoVocabulary
                    }
                    _ => GroupStatus::TooSmall,
                };
                groups.push(GroupReport {
                    key: group.key,
                    members: group.members,
                    status,
                    keywords: Vec::new(),
                });
            }
        }
    }

    debug!(
        groups = groups.len(),
        anomalies = anomalies.len(),
        notes = notes.len(),
        "Aggregated analysis report"
    );

    AnalysisReport {
        institution: institution.name.clone(),
        country: institution.country.clone(),
        grouping: grouping.to_string(),
        lesson_count: institution.lessons.len(),
        groups,
        anomalies,
        intra_lesson,
        cross_lesson,
        notes,
    }
}
