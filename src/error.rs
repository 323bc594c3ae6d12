// Domain error taxonomy for an analysis run.
//
// Per-group conditions (NoVocabulary, InsufficientGroupSize) are recovered
// by the pipeline and degrade the report. MalformedInput is fatal and is
// returned to the caller with the offending key.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The group's skill documents yield no usable tokens.
    #[error("group '{group}' has no usable vocabulary")]
    NoVocabulary { group: String },

    /// Fewer than two members, nothing to compare against.
    #[error("group '{group}' has {members} member(s), at least 2 are needed for comparison")]
    InsufficientGroupSize { group: String, members: usize },

    /// The input contract is not the expected shape.
    #[error("malformed input at '{key}': {reason}")]
    MalformedInput { key: String, reason: String },
}

impl AnalysisError {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True for conditions that only skip one group rather than aborting the run.
    pub fn is_group_local(&self) -> bool {
        matches!(
            self,
            Self::NoVocabulary { .. } | Self::InsufficientGroupSize { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_key() {
        let err = AnalysisError::malformed("Physics 101", "expected an array of skills");
        assert_eq!(
            err.to_string(),
            "malformed input at 'Physics 101': expected an array of skills"
        );
        assert!(!err.is_group_local());
    }

    #[test]
    fn test_group_local_variants() {
        let no_vocab = AnalysisError::NoVocabulary {
            group: "Physics".to_string(),
        };
        let too_small = AnalysisError::InsufficientGroupSize {
            group: "History".to_string(),
            members: 1,
        };
        assert!(no_vocab.is_group_local());
        assert!(too_small.is_group_local());
    }
}
