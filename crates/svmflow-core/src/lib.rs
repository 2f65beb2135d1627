//! svmflow-core: building blocks for the svmflow training and classification CLI.
//!
//! This crate keeps the orchestration-facing pieces small and testable: sparse
//! sample/dataset types, a declared default training configuration, the
//! `ClassifierEngine` and `Codec` capability seams (with a linfa-svm backed
//! engine and a plain-text/JSON codec), and the aggregation of raw prediction
//! output into outcome counts.
pub mod aggregate;
pub mod codec;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod model;
