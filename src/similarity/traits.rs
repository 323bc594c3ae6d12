// Skill vectorizer trait: swap-ready abstraction.
//
// TF-IDF is the default. An embeddings-based vectorizer can be dropped in
// later without changing the similarity matrix or coherence scoring.

use super::vectorizer::GroupVectors;
use crate::catalogue::Lesson;
use crate::error::AnalysisError;

pub trait SkillVectorizer {
    /// Vectorize one group's lessons over a shared vocabulary.
    ///
    /// Returns `NoVocabulary` when the lessons yield no usable tokens.
    fn vectorize(&self, group_key: &str, lessons: &[&Lesson]) -> Result<GroupVectors, AnalysisError>;
}
