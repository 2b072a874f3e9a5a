use crate::classifier::{DEFAULT_MODEL_ID, DEFAULT_REVISION};
use crate::error::Result;
use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::Device;
use clap::Parser;
use std::path::PathBuf;

/// Serve a two-label sentiment classifier over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Hub repository the tokenizer and model are fetched from.
    #[arg(long, env = "SENTIMENT_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    #[arg(long, env = "SENTIMENT_MODEL_REVISION", default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// Local checkpoint directory. Takes precedence over the hub.
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    #[arg(long, env = "SENTIMENT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "SENTIMENT_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Number of HTTP worker threads. Defaults to one per physical core.
    #[arg(long, env = "SENTIMENT_WORKERS")]
    pub workers: Option<usize>,

    /// Run on the CPU even when an accelerator is available.
    #[arg(long, env = "SENTIMENT_CPU")]
    pub cpu: bool,
}

impl Settings {
    pub fn device(&self) -> Result<Device> {
        if self.cpu {
            Ok(Device::Cpu)
        } else if cuda_is_available() {
            Ok(Device::new_cuda(0)?)
        } else if metal_is_available() {
            Ok(Device::new_metal(0)?)
        } else {
            Ok(Device::Cpu)
        }
    }
}
