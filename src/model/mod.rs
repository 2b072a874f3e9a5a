pub mod bert;
pub mod config;

pub use bert::BertForSequenceClassification;
pub use config::{ClassifierConfig, Config, NUM_LABELS};
