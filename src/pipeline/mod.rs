// Analysis pipeline: wires the stages together for one run.

pub mod analyze;
