use crate::error::{Error, Result};
use candle_transformers::models::bert::Config as BertConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Width of the classification head. Index 0 is negative, index 1 is positive.
pub const NUM_LABELS: usize = 2;

/// A `config.json` split into the encoder part and the head part.
///
/// Both halves are read from the same JSON object, so keys such as
/// `hidden_size` are visible to each of them.
#[derive(Debug, Clone)]
pub struct Config {
    pub bert_config: BertConfig,
    pub classifier_config: ClassifierConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassifierConfig {
    pub hidden_size: usize,
    #[serde(default)]
    pub pad_token_id: u32,
    #[serde(default = "default_initializer_range")]
    pub initializer_range: f64,
    #[serde(default)]
    pub num_labels: Option<usize>,
    #[serde(default)]
    pub id2label: Option<HashMap<String, String>>,
}

fn default_initializer_range() -> f64 {
    0.02
}

impl ClassifierConfig {
    /// Number of labels the checkpoint declares, if it declares any.
    pub fn declared_labels(&self) -> Option<usize> {
        self.num_labels
            .or_else(|| self.id2label.as_ref().map(|labels| labels.len()))
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let raw: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        let bert_config: BertConfig = serde_json::from_value(raw.clone())?;
        let classifier_config: ClassifierConfig = serde_json::from_value(raw)?;

        if let Some(labels) = classifier_config.declared_labels() {
            if labels != NUM_LABELS {
                return Err(Error::Config(format!(
                    "checkpoint declares {labels} labels, expected {NUM_LABELS}"
                )));
            }
        }

        Ok(Self {
            bert_config,
            classifier_config,
        })
    }
}
