// Skill similarity: TF-IDF vectors, cosine matrices, and keyword profiles.

pub mod keywords;
pub mod matrix;
pub mod traits;
pub mod vectorizer;

pub use matrix::{cosine_similarity, SimilarityMatrix};
pub use traits::SkillVectorizer;
pub use vectorizer::{GroupVectors, SkillVector, TfIdfVectorizer};
