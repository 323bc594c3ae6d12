// Group keyword profiles via TF-IDF keyword extraction.
//
// Uses the `keyword_extraction` crate with each lesson's skill text as a
// separate document, so words found in every lesson are downweighted and
// the words that characterise the group rise to the top. English stop
// words are removed ("of", "and", ...), which matters for multi-word skill
// names like "history of science".
//
// The profile only labels a group in the report; it never feeds the
// similarity matrix.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::debug;

/// A ranked keyword with its TF-IDF score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupKeyword {
    pub word: String,
    pub score: f64,
}

pub struct KeywordProfiler {
    /// How many keywords to keep per group
    pub top_n: usize,
}

impl Default for KeywordProfiler {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl KeywordProfiler {
    /// Rank the most characteristic words across a group's skill documents.
    pub fn profile(&self, documents: &[String]) -> Result<Vec<GroupKeyword>> {
        if documents.iter().all(|d| d.trim().is_empty()) {
            anyhow::bail!("No skill text to profile");
        }

        let stop_words: Vec<String> = get(LANGUAGE::English);
        let params = TfIdfParams::UnprocessedDocuments(documents, &stop_words, None);
        let tfidf = TfIdf::new(params);

        let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(self.top_n);
        if ranked.is_empty() {
            anyhow::bail!(
                "Keyword extraction produced nothing from {} documents",
                documents.len()
            );
        }

        debug!(
            keywords = ranked.len(),
            top_keyword = &ranked[0].0,
            "Extracted group keywords"
        );

        Ok(ranked
            .into_iter()
            .map(|(word, score)| GroupKeyword {
                word,
                score: score as f64,
            })
            .collect())
    }
}
