//! svmflow-cli: the command-line workflow around svmflow-core.
//!
//! Mode selection, the train/classify orchestration, and the text report
//! formatter live here; the binary in `main.rs` is a thin argument layer on
//! top.
pub mod report;
pub mod util;
pub mod workflow;
