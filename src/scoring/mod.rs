// Scoring: per-lesson and per-group coherence.

pub mod coherence;
