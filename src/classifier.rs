pub use candle_core::Device;
use crate::error::{Error, Result};
use crate::model::{BertForSequenceClassification, Config};
use crate::sentiment::Sentiment;
use candle_core::{DType, Tensor};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use std::path::{Path, PathBuf};
use tokenizers::{
    Encoding, PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams,
};

pub const DEFAULT_MODEL_ID: &str = "google-bert/bert-base-cased";
pub const DEFAULT_REVISION: &str = "main";

/// Every input is padded or truncated to exactly this many token ids.
pub const MAX_SEQUENCE_LENGTH: usize = 128;

/// Anything that turns a text into a sentiment label.
pub trait Classify: Send + Sync {
    fn predict(&self, text: &str) -> Result<Sentiment>;
}

/// Paths of the three artifacts a checkpoint is made of.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        }
    }

    /// Fetches the artifacts into the local hub cache, reusing cached copies.
    pub fn from_hub(model_id: &str, revision: &str) -> Result<Self> {
        let api = Api::new()?;
        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));
        tracing::info!(model_id, revision, "fetching model from the hub");
        Ok(Self {
            config: repo.get("config.json")?,
            tokenizer: repo.get("tokenizer.json")?,
            weights: repo.get("model.safetensors")?,
        })
    }
}

/// Tokenizer and model, loaded once and only read afterwards.
pub struct SentimentClassifier {
    model: BertForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
}

impl SentimentClassifier {
    /// Loads a checkpoint from a local directory holding `config.json`,
    /// `tokenizer.json` and `model.safetensors`.
    pub fn load<P: AsRef<Path>>(path: P, device: Device) -> Result<Self> {
        Self::from_files(&ModelFiles::in_dir(path), device)
    }

    pub fn from_hub(model_id: &str, revision: &str, device: Device) -> Result<Self> {
        Self::from_files(&ModelFiles::from_hub(model_id, revision)?, device)
    }

    pub fn from_files(files: &ModelFiles, device: Device) -> Result<Self> {
        let config = Config::from_file(&files.config)?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer).map_err(|e| {
            Error::Tokenization(format!(
                "failed to load tokenizer from '{}': {e}",
                files.tokenizer.display()
            ))
        })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device)
        }?;

        Self::from_parts(vb, &config, tokenizer)
    }

    /// Builds the classifier from already opened weights and tokenizer.
    pub fn from_parts(vb: VarBuilder, config: &Config, tokenizer: Tokenizer) -> Result<Self> {
        let device = vb.device().clone();
        let tokenizer = configure_tokenizer(tokenizer, config.classifier_config.pad_token_id)?;
        let model = BertForSequenceClassification::load(vb, config)?;
        tracing::info!(?device, "sentiment classifier ready");
        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn encode(&self, text: &str) -> Result<Encoding> {
        self.tokenizer
            .encode(text, true)
            .map_err(|e| Error::Tokenization(e.to_string()))
    }

    /// Raw scores of the two classes for `text`.
    pub fn logits(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self.encode(text)?;
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&input_ids, &token_type_ids, &attention_mask)?;
        Ok(logits.squeeze(0)?.to_dtype(DType::F32)?.to_vec1()?)
    }
}

impl Classify for SentimentClassifier {
    fn predict(&self, text: &str) -> Result<Sentiment> {
        let logits = self.logits(text)?;
        let sentiment = Sentiment::from_logits(&logits)?;
        tracing::debug!(%sentiment, ?logits, "classified text");
        Ok(sentiment)
    }
}

/// Pads on the right with `pad_id` and truncates, both to
/// [`MAX_SEQUENCE_LENGTH`].
pub fn configure_tokenizer(mut tokenizer: Tokenizer, pad_id: u32) -> Result<Tokenizer> {
    let pad_token = tokenizer
        .id_to_token(pad_id)
        .unwrap_or_else(|| "[PAD]".to_string());
    tokenizer
        .with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(MAX_SEQUENCE_LENGTH),
            direction: PaddingDirection::Right,
            pad_id,
            pad_token,
            ..Default::default()
        }))
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQUENCE_LENGTH,
            ..Default::default()
        }))
        .map_err(|e| Error::Tokenization(e.to_string()))?;
    Ok(tokenizer)
}
