// Coherence scoring: how well each lesson fits its peer group.
//
// A lesson's coherence is the mean of its similarity row with the self-entry
// removed. The group score is the mean of member scores, floored so an
// analyzed group never reports zero or negative coherence. Lessons strictly
// below the anomaly threshold are flagged.

use serde::{Deserialize, Serialize};

use crate::catalogue::Lesson;
use crate::similarity::SimilarityMatrix;

/// Tunable thresholds for coherence scoring.
///
/// The defaults (0.2 threshold, 0.001 floor) carry no derivation beyond
/// matching the established behaviour, so both are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceSettings {
    /// Lessons scoring strictly below this are anomalies (default 0.2)
    pub anomaly_threshold: f64,
    /// Minimum reported group score (default 0.001)
    pub group_score_floor: f64,
    /// Top/bottom diagnostics appear once a group has more members than this (default 3)
    pub diagnostic_min_members: usize,
    /// How many lessons the top/bottom diagnostics list (default 3)
    pub diagnostic_top_k: usize,
}

impl Default for CoherenceSettings {
    fn default() -> Self {
        Self {
            anomaly_threshold: 0.2,
            group_score_floor: 0.001,
            diagnostic_min_members: 3,
            diagnostic_top_k: 3,
        }
    }
}

/// One lesson's mean similarity to its peers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonScore {
    pub lesson: String,
    pub score: f64,
}

/// A lesson whose skill set is out of step with its peer group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub group_key: String,
    pub lesson_name: String,
    pub score: f64,
    pub skills: Vec<String>,
}

/// Most and least cohesive lessons, both ranked by score descending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoherenceDiagnostics {
    pub most_cohesive: Vec<LessonScore>,
    pub least_cohesive: Vec<LessonScore>,
}

/// Coherence results for one analyzed group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCoherence {
    pub group_key: String,
    /// Member scores in matrix order
    pub lesson_scores: Vec<LessonScore>,
    pub group_score: f64,
    pub anomalies: Vec<Anomaly>,
    pub diagnostics: Option<CoherenceDiagnostics>,
}

/// Mean of the row excluding the self-entry. 0.0 for a 1×1 matrix.
pub fn lesson_coherence(matrix: &SimilarityMatrix, index: usize) -> f64 {
    let (sum, count) = matrix
        .peers(index)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Mean of member scores, floored and capped to [floor, 1.0].
pub fn group_score(lesson_scores: &[LessonScore], floor: f64) -> f64 {
    if lesson_scores.is_empty() {
        return floor;
    }
    let mean = lesson_scores.iter().map(|s| s.score).sum::<f64>() / lesson_scores.len() as f64;
    mean.max(floor).min(1.0)
}

/// Score a group from its similarity matrix.
///
/// `members` must be in matrix order.
pub fn score_group(
    group_key: &str,
    members: &[&Lesson],
    matrix: &SimilarityMatrix,
    settings: &CoherenceSettings,
) -> GroupCoherence {
    let lesson_scores: Vec<LessonScore> = members
        .iter()
        .enumerate()
        .map(|(i, lesson)| LessonScore {
            lesson: lesson.name.clone(),
            score: lesson_coherence(matrix, i),
        })
        .collect();

    let anomalies = members
        .iter()
        .zip(&lesson_scores)
        .filter(|(_, s)| s.score < settings.anomaly_threshold)
        .map(|(lesson, s)| Anomaly {
            group_key: group_key.to_string(),
            lesson_name: lesson.name.clone(),
            score: s.score,
            skills: lesson.skills.clone(),
        })
        .collect();

    let diagnostics = if lesson_scores.len() > settings.diagnostic_min_members {
        Some(rank_extremes(&lesson_scores, settings.diagnostic_top_k))
    } else {
        None
    };

    GroupCoherence {
        group_key: group_key.to_string(),
        group_score: group_score(&lesson_scores, settings.group_score_floor),
        lesson_scores,
        anomalies,
        diagnostics,
    }
}

/// Top-k and bottom-k of a descending stable sort (ties keep input order).
pub fn rank_extremes(scores: &[LessonScore], k: usize) -> CoherenceDiagnostics {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let k = k.min(ranked.len());
    CoherenceDiagnostics {
        most_cohesive: ranked[..k].to_vec(),
        least_cohesive: ranked[ranked.len() - k..].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::{GroupVectors, SkillVector};

    fn matrix_from(rows: &[&[f64]]) -> SimilarityMatrix {
        let vectors = GroupVectors {
            vocabulary: (0..rows[0].len()).map(|i| i.to_string()).collect(),
            vectors: rows
                .iter()
                .map(|r| SkillVector {
                    lesson: String::new(),
                    weights: r.to_vec(),
                })
                .collect(),
        };
        SimilarityMatrix::compute("g", &vectors).unwrap()
    }

    fn scores(values: &[(&str, f64)]) -> Vec<LessonScore> {
        values
            .iter()
            .map(|(l, s)| LessonScore {
                lesson: l.to_string(),
                score: *s,
            })
            .collect()
    }

    #[test]
    fn test_lesson_coherence_is_row_mean_without_self() {
        // rows 0 and 1 identical, row 2 orthogonal
        let m = matrix_from(&[&[1.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]]);
        assert!((lesson_coherence(&m, 0) - 0.5).abs() < 1e-12);
        assert!((lesson_coherence(&m, 2) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_group_score_floor() {
        let s = scores(&[("a", 0.0), ("b", 0.0)]);
        assert_eq!(group_score(&s, 0.001), 0.001);
        let s = scores(&[("a", 0.4), ("b", 0.6)]);
        assert!((group_score(&s, 0.001) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        let a = Lesson::new("A", &["x"]);
        let b = Lesson::new("B", &["y"]);
        let m = matrix_from(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let settings = CoherenceSettings {
            anomaly_threshold: 0.0,
            ..Default::default()
        };
        // score 0.0 is not strictly below 0.0
        let result = score_group("g", &[&a, &b], &m, &settings);
        assert!(result.anomalies.is_empty());

        let result = score_group("g", &[&a, &b], &m, &CoherenceSettings::default());
        assert_eq!(result.anomalies.len(), 2);
        assert_eq!(result.anomalies[0].skills, vec!["x"]);
    }

    #[test]
    fn test_rank_extremes_stable_ties() {
        let s = scores(&[("a", 0.5), ("b", 0.9), ("c", 0.5), ("d", 0.1), ("e", 0.5)]);
        let d = rank_extremes(&s, 3);
        let top: Vec<&str> = d.most_cohesive.iter().map(|s| s.lesson.as_str()).collect();
        let bottom: Vec<&str> = d.least_cohesive.iter().map(|s| s.lesson.as_str()).collect();
        assert_eq!(top, vec!["b", "a", "c"]);
        assert_eq!(bottom, vec!["c", "e", "d"]);
    }

    #[test]
    fn test_diagnostics_only_for_larger_groups() {
        let lessons: Vec<Lesson> = (0..4).map(|i| Lesson::new(format!("L{i}"), &["x"])).collect();
        let refs: Vec<&Lesson> = lessons.iter().collect();
        let m = matrix_from(&[&[1.0], &[1.0], &[1.0], &[1.0]]);
        let result = score_group("g", &refs, &m, &CoherenceSettings::default());
        assert!(result.diagnostics.is_some());

        let m = matrix_from(&[&[1.0], &[1.0], &[1.0]]);
        let result = score_group("g", &refs[..3], &m, &CoherenceSettings::default());
        assert!(result.diagnostics.is_none());
    }
}
