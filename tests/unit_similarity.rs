// Unit tests for vectorization, the similarity matrix, and coherence scoring.
//
// Checks the matrix invariants (unit diagonal, symmetry, [0, 1] range) and
// that coherence is exactly the row mean without the self-entry.

use skillaudit::catalogue::Lesson;
use skillaudit::error::AnalysisError;
use skillaudit::scoring::coherence::{group_score, lesson_coherence, score_group, CoherenceSettings};
use skillaudit::similarity::{SimilarityMatrix, SkillVectorizer, TfIdfVectorizer};

fn curriculum() -> Vec<Lesson> {
    vec![
        Lesson::new("Physics 101", &["calculus", "classical mechanics", "vectors"]),
        Lesson::new("Physics 201", &["calculus", "thermodynamics", "statistical mechanics"]),
        Lesson::new("Physics 202", &["electromagnetism", "vectors", "calculus"]),
        Lesson::new("Physics 301", &["quantum mechanics", "linear algebra"]),
        Lesson::new("Physics 999", &["watercolour", "portraiture"]),
    ]
}

fn matrix_for(lessons: &[Lesson]) -> SimilarityMatrix {
    let refs: Vec<&Lesson> = lessons.iter().collect();
    let vectors = TfIdfVectorizer::default().vectorize("Physics", &refs).unwrap();
    SimilarityMatrix::compute("Physics", &vectors).unwrap()
}

// ============================================================
// Vectorizer
// ============================================================

#[test]
fn vectors_share_dimensionality() {
    let lessons = curriculum();
    let refs: Vec<&Lesson> = lessons.iter().collect();
    let vectors = TfIdfVectorizer::default().vectorize("Physics", &refs).unwrap();
    assert_eq!(vectors.vectors.len(), lessons.len());
    for v in &vectors.vectors {
        assert_eq!(v.weights.len(), vectors.dimension());
        assert!(v.weights.iter().all(|&w| w >= 0.0));
    }
}

#[test]
fn all_empty_group_reports_no_vocabulary() {
    let a = Lesson::new("Blank 1", &[]);
    let b = Lesson::new("Blank 2", &[]);
    let err = TfIdfVectorizer::default().vectorize("Blank", &[&a, &b]).unwrap_err();
    assert!(err.is_group_local());
    assert!(matches!(err, AnalysisError::NoVocabulary { .. }));
}

// ============================================================
// Similarity matrix invariants
// ============================================================

#[test]
fn matrix_invariants_hold() {
    let m = matrix_for(&curriculum());
    assert_eq!(m.len(), 5);
    for i in 0..m.len() {
        assert_eq!(m.get(i, i), 1.0, "diagonal must be exactly 1.0");
        for j in 0..m.len() {
            let v = m.get(i, j);
            assert!((0.0..=1.0).contains(&v), "entry ({i},{j}) = {v}");
        }
    }
    assert!(m.is_symmetric(1e-12));
}

#[test]
fn shared_skill_gives_positive_similarity() {
    let lessons = vec![
        Lesson::new("Physics 101", &["calculus", "mechanics"]),
        Lesson::new("Physics 201", &["calculus", "thermodynamics"]),
    ];
    let m = matrix_for(&lessons);
    assert!(m.get(0, 1) > 0.0);
    assert!(m.get(0, 1) < 1.0);
}

#[test]
fn disjoint_vocabularies_give_zero_similarity() {
    let lessons = vec![
        Lesson::new("Art 101", &["watercolour"]),
        Lesson::new("Art 102", &["metallurgy"]),
    ];
    let m = matrix_for(&lessons);
    assert_eq!(m.get(0, 1), 0.0);
}

#[test]
fn identical_skill_sets_give_full_similarity() {
    let lessons = vec![
        Lesson::new("Maths 1", &["sets", "functions"]),
        Lesson::new("Maths 2", &["functions", "sets"]),
    ];
    let m = matrix_for(&lessons);
    assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
}

#[test]
fn matrix_is_reproducible() {
    let lessons = curriculum();
    assert_eq!(matrix_for(&lessons), matrix_for(&lessons));
}

// ============================================================
// Coherence
// ============================================================

#[test]
fn coherence_is_exact_row_mean() {
    let m = matrix_for(&curriculum());
    for i in 0..m.len() {
        let peers: Vec<f64> = (0..m.len()).filter(|&j| j != i).map(|j| m.get(i, j)).collect();
        let expected = peers.iter().sum::<f64>() / peers.len() as f64;
        assert!((lesson_coherence(&m, i) - expected).abs() < 1e-12);
    }
}

#[test]
fn outlier_lesson_is_flagged() {
    let lessons = curriculum();
    let refs: Vec<&Lesson> = lessons.iter().collect();
    let m = matrix_for(&lessons);
    let result = score_group("Physics", &refs, &m, &CoherenceSettings::default());

    let flagged: Vec<&str> = result.anomalies.iter().map(|a| a.lesson_name.as_str()).collect();
    assert!(flagged.contains(&"Physics 999"), "flagged: {flagged:?}");
    let outlier = result.anomalies.iter().find(|a| a.lesson_name == "Physics 999").unwrap();
    assert_eq!(outlier.score, 0.0);
    assert_eq!(outlier.skills, vec!["watercolour", "portraiture"]);
    assert_eq!(outlier.group_key, "Physics");

    // Five members > 3, so diagnostics are present and the outlier ranks last
    let diag = result.diagnostics.as_ref().unwrap();
    assert_eq!(diag.most_cohesive.len(), 3);
    assert_eq!(diag.least_cohesive.last().unwrap().lesson, "Physics 999");
}

#[test]
fn group_score_is_floored_mean() {
    let lessons = curriculum();
    let refs: Vec<&Lesson> = lessons.iter().collect();
    let m = matrix_for(&lessons);
    let result = score_group("Physics", &refs, &m, &CoherenceSettings::default());
    let mean = result.lesson_scores.iter().map(|s| s.score).sum::<f64>() / 5.0;
    assert!((result.group_score - mean.max(0.001)).abs() < 1e-12);
    assert!(result.group_score >= 0.001 && result.group_score <= 1.0);
    assert_eq!(group_score(&result.lesson_scores, 0.001), result.group_score);
}

#[test]
fn custom_threshold_changes_flags() {
    let lessons = curriculum();
    let refs: Vec<&Lesson> = lessons.iter().collect();
    let m = matrix_for(&lessons);
    let strict = CoherenceSettings {
        anomaly_threshold: 1.01,
        ..Default::default()
    };
    let result = score_group("Physics", &refs, &m, &strict);
    assert_eq!(result.anomalies.len(), lessons.len());
}
