//! Model implementations.
pub mod naive_bayes;

pub use naive_bayes::{NaiveBayesModel, Prediction};
