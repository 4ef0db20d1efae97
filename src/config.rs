use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_UNSEEN_FIRST_TOKEN_WEIGHT: f64 = 1e-5;
pub const DEFAULT_UNSEEN_WEIGHT: f64 = 1e-6;

/// Probabilities substituted for events missing from the model at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Args, Serialize, Deserialize)]
pub struct Smoothing {
    /// weight of an unseen emission for the first token of a sequence
    #[arg(long, default_value_t = DEFAULT_UNSEEN_FIRST_TOKEN_WEIGHT)]
    pub unseen_first_token_weight: f64,
    /// weight of any other unseen emission or transition
    #[arg(long, default_value_t = DEFAULT_UNSEEN_WEIGHT)]
    pub unseen_weight: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            unseen_first_token_weight: DEFAULT_UNSEEN_FIRST_TOKEN_WEIGHT,
            unseen_weight: DEFAULT_UNSEEN_WEIGHT,
        }
    }
}

impl Smoothing {
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("unseen_first_token_weight", self.unseen_first_token_weight),
            ("unseen_weight", self.unseen_weight),
        ] {
            if !(w > 0.0 && w <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {w}"
                )));
            }
        }
        Ok(())
    }
}

/// Where the estimator reads the tagged corpus and writes the model.
#[derive(Debug, Clone, Args)]
pub struct EstimatorConfig {
    /// word/tag corpus, one record per line
    #[arg(short, long = "corpus", value_name = "CORPUS")]
    pub corpus_path: PathBuf,
    /// destination of the model JSON
    #[arg(short, long = "output", value_name = "MODEL")]
    pub model_output_path: PathBuf,
}

/// A model and the tokens to tag with it.
#[derive(Debug, Clone, Args)]
pub struct DecoderConfig {
    /// read the model from a file (MODEL)
    #[arg(short, long = "model", value_name = "MODEL")]
    pub model_path: PathBuf,
    #[command(flatten)]
    pub smoothing: Smoothing,
    /// tokens of one sentence, in order
    #[arg(required = true, value_name = "TOKEN")]
    pub tokens: Vec<String>,
}
