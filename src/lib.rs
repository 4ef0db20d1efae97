//! Hidden Markov Model part-of-speech tagging.
//!
//! A tagged corpus (`<word> <tag>` per line) is split into sentences and
//! counted into start, transition and emission distributions, which are saved
//! as one JSON model. [`HmmTagger`] decodes new token sequences against that
//! model with the Viterbi algorithm.
//!
//! ```no_run
//! use hmmtag::{Corpus, HmmTagger, Smoothing, Tagger};
//!
//! # fn main() -> hmmtag::Result<()> {
//! let corpus = Corpus::read_file("corpus.txt")?;
//! let (model, report) = hmmtag::estimate(&corpus);
//! println!("{report}");
//! model.save("hmm.json")?;
//!
//! let tagger = HmmTagger::new(&model, Smoothing::default())?;
//! let tags = tagger.tag(&["The", "dog", "runs"])?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod hmm;
mod persist;
pub mod tools;

pub use config::{DecoderConfig, EstimatorConfig, Smoothing};
pub use corpus::{Corpus, Sentence, TaggedToken};
pub use error::{Error, Result};
pub use evaluation::{evaluate_corpus, Estimation, Evaluation};
pub use hmm::{
    estimator::{estimate, train, EstimationReport, Estimator},
    model::HmmModel,
    tagger::{decode, HmmTagger, Prediction, Tagger},
};
