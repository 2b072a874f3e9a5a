#![allow(dead_code)]

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use sentiment_endpoint::classifier::{Classify, SentimentClassifier};
use sentiment_endpoint::model::Config;
use sentiment_endpoint::{Result, Sentiment};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokenizers::Tokenizer;

pub const TOKENIZER_JSON: &str = include_str!("../fixtures/tokenizer.json");

pub fn tiny_config_json() -> serde_json::Value {
    json!({
        "architectures": ["BertForMaskedLM"],
        "vocab_size": 16,
        "hidden_size": 8,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 16,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.0,
        "attention_probs_dropout_prob": 0.0,
        "max_position_embeddings": 128,
        "type_vocab_size": 2,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-12,
        "pad_token_id": 0,
        "model_type": "bert"
    })
}

pub fn tokenizer() -> Tokenizer {
    Tokenizer::from_bytes(TOKENIZER_JSON.as_bytes()).unwrap()
}

/// A randomly initialised BERT small enough to run in tests. The returned
/// map holds the encoder weights.
pub fn tiny_classifier() -> (SentimentClassifier, VarMap) {
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    let config = Config::from_value(tiny_config_json()).unwrap();
    let classifier = SentimentClassifier::from_parts(vb, &config, tokenizer()).unwrap();
    (classifier, varmap)
}

/// Returns a fixed label and counts how often it was asked.
pub struct FixedClassifier {
    pub sentiment: Sentiment,
    pub calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(sentiment: Sentiment) -> Self {
        Self {
            sentiment,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classify for FixedClassifier {
    fn predict(&self, _text: &str) -> Result<Sentiment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sentiment)
    }
}

/// Fails every prediction.
pub struct BrokenClassifier;

impl Classify for BrokenClassifier {
    fn predict(&self, _text: &str) -> Result<Sentiment> {
        Err(sentiment_endpoint::Error::Inference(
            "model state is corrupt".to_string(),
        ))
    }
}
