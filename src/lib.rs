//! HTTP service that labels text as `Positive` or `Negative` with a
//! BERT sequence classifier.
//!
//! The tokenizer and model are loaded once into a [`SentimentClassifier`]
//! and shared read-only by every request handled by [`server`].

pub mod classifier;
pub mod error;
pub mod model;
pub mod sentiment;
pub mod server;
pub mod settings;

pub use classifier::{Classify, SentimentClassifier, MAX_SEQUENCE_LENGTH};
pub use error::{Error, Result};
pub use sentiment::{Sentiment, SentimentRequest, SentimentResponse};
