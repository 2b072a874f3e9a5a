use crate::error::{Error, Result};
use crate::model::config::NUM_LABELS;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Binary sentiment label. Serialized as `"Negative"` / `"Positive"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Negative),
            1 => Some(Self::Positive),
            _ => None,
        }
    }

    /// Picks the label of the highest logit. Ties go to the lower index.
    pub fn from_logits(logits: &[f32]) -> Result<Self> {
        if logits.len() != NUM_LABELS {
            return Err(Error::Inference(format!(
                "expected {NUM_LABELS} logits, got {}",
                logits.len()
            )));
        }
        argmax(logits)
            .and_then(Self::from_class_index)
            .ok_or_else(|| Error::Inference("no logits to classify".to_string()))
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "Negative"),
            Self::Positive => write!(f, "Positive"),
        }
    }
}

/// Index of the first maximum value.
pub fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SentimentResponse {
    pub sentiment: Sentiment,
}
