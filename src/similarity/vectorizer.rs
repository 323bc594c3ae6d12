// TF-IDF vectorization of lesson skill lists.
//
// Each lesson is one document: its skills joined by spaces. Tokens are
// whitespace-delimited, lowercased, and trimmed of surrounding punctuation.
//
//   tf(t, d)  = raw count of t in d
//   idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//   w(t, d)   = tf * idf, then L2-normalized per lesson
//
// Tokens shared by every lesson in the group keep a weight of 1 before
// normalization; tokens distinctive to a few lessons are boosted.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::traits::SkillVectorizer;
use crate::catalogue::Lesson;
use crate::error::AnalysisError;

/// One lesson's weights over the group vocabulary (same index order).
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVector {
    pub lesson: String,
    pub weights: Vec<f64>,
}

impl SkillVector {
    pub fn magnitude(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.weights.iter().all(|&w| w == 0.0)
    }
}

/// Vectors for every member of one group, in member order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupVectors {
    pub vocabulary: Vec<String>,
    pub vectors: Vec<SkillVector>,
}

impl GroupVectors {
    /// Weight of `term` for the lesson at `index` (0.0 when absent).
    pub fn weight(&self, index: usize, term: &str) -> f64 {
        let Some(pos) = self.vocabulary.iter().position(|t| t == term) else {
            return 0.0;
        };
        self.vectors
            .get(index)
            .and_then(|v| v.weights.get(pos))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

pub struct TfIdfVectorizer {
    /// Scale each lesson vector to unit length
    pub normalize: bool,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl SkillVectorizer for TfIdfVectorizer {
    fn vectorize(&self, group_key: &str, lessons: &[&Lesson]) -> Result<GroupVectors, AnalysisError> {
        let documents: Vec<Vec<String>> = lessons.iter().map(|l| tokenize_skills(&l.skills)).collect();

        // Vocabulary in first-seen order so vectors are reproducible run to run
        let mut vocabulary: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in &documents {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in doc {
                if !seen.insert(token.as_str()) {
                    continue;
                }
                match index.get(token) {
                    Some(&i) => document_frequency[i] += 1,
                    None => {
                        index.insert(token.clone(), vocabulary.len());
                        vocabulary.push(token.clone());
                        document_frequency.push(1);
                    }
                }
            }
        }

        if vocabulary.is_empty() {
            return Err(AnalysisError::NoVocabulary {
                group: group_key.to_string(),
            });
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = lessons
            .iter()
            .zip(&documents)
            .map(|(lesson, doc)| {
                let mut weights = vec![0.0; vocabulary.len()];
                for token in doc {
                    if let Some(&i) = index.get(token) {
                        weights[i] += 1.0;
                    }
                }
                for (w, idf) in weights.iter_mut().zip(&idf) {
                    *w *= idf;
                }
                if self.normalize {
                    l2_normalize(&mut weights);
                }
                SkillVector {
                    lesson: lesson.name.clone(),
                    weights,
                }
            })
            .collect();

        debug!(
            group = group_key,
            lessons = lessons.len(),
            vocabulary = vocabulary.len(),
            "Vectorized group skills"
        );

        Ok(GroupVectors { vocabulary, vectors })
    }
}

/// Split skill strings into normalized tokens.
pub fn tokenize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .flat_map(|skill| skill.split_whitespace())
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn l2_normalize(weights: &mut [f64]) {
    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in weights.iter_mut() {
            *w /= norm;
        }
    }
}
