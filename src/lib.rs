// Skillaudit: skill duplication and peer-group coherence analysis.
//
// This is the library root. Each module corresponds to one stage of the
// analysis, from the input contract through to the rendered report.

pub mod catalogue;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod grouping;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod similarity;
pub mod source;
