//! nbayes: a categorical Naive Bayes classification pipeline.
//!
//! Parses a `;`-delimited dataset, performs a deterministic stratified
//! train/test split, fits a Laplace-smoothed Naive Bayes model, predicts the
//! held-out instances, and reports a confusion matrix with accuracy,
//! precision, and recall. Every stage appends human-readable derivation
//! lines to a report buffer instead of writing to any output sink.
//!
//! Probability arithmetic deliberately mirrors the two-decimal hand
//! calculation the pipeline reproduces: values are rounded at the point of
//! computation and used in rounded form downstream.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;
