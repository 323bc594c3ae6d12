// Pairwise cosine similarity over one group's skill vectors.
//
// cos(a, b) = (a · b) / (|a| |b|), defined as 0.0 when either magnitude is
// zero. TF-IDF weights are non-negative, so values land in [0, 1]; they are
// clamped anyway to absorb floating-point drift. The diagonal is forced to
// 1.0 and the lower triangle mirrors the upper one, so the matrix is exactly
// symmetric.

use super::vectorizer::GroupVectors;
use crate::error::AnalysisError;

/// Cosine similarity between two equal-length weight vectors.
///
/// Returns 0.0 for mismatched lengths, empty input, or a zero vector.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Symmetric n×n similarity matrix with unit diagonal, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the matrix for a group. Needs at least two members.
    pub fn compute(group_key: &str, vectors: &GroupVectors) -> Result<Self, AnalysisError> {
        let n = vectors.vectors.len();
        if n < 2 {
            return Err(AnalysisError::InsufficientGroupSize {
                group: group_key.to_string(),
                members: n,
            });
        }

        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let sim = cosine_similarity(&vectors.vectors[i].weights, &vectors.vectors[j].weights);
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        Ok(Self { size: n, values })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Similarities of row `i` to every other member (self-entry removed).
    pub fn peers(&self, i: usize) -> impl Iterator<Item = f64> + '_ {
        self.row(i)
            .iter()
            .enumerate()
            .filter(move |(j, _)| *j != i)
            .map(|(_, &v)| v)
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }
}
