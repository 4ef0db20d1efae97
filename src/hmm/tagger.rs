use super::{lattice::Lattice, model::HmmModel, states::StateSet};
use crate::{
    config::{DecoderConfig, Smoothing},
    error::{Error, Result},
};

/// Best tag sequence for one input together with its log-probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub tags: Vec<String>,
    pub log_prob: f64,
}

pub trait Tagger {
    /// Tags the decoder can emit.
    fn labels(&self) -> Vec<&str>;
    fn viterbi(&self, tokens: &[&str]) -> Result<Prediction>;

    fn tag(&self, tokens: &[&str]) -> Result<Vec<String>> {
        Ok(self.viterbi(tokens)?.tags)
    }
}

/// First-order HMM tagger borrowing a trained model.
///
/// Unseen emissions and transitions are scored with the configured
/// [`Smoothing`] weights instead of zero, so every input gets a path.
pub struct HmmTagger<'a> {
    model: &'a HmmModel,
    smoothing: Smoothing,
    states: StateSet,
    /// log start probability per state
    start: Vec<f64>,
    /// log transition score, `num_states * prev + curr`
    trans: Vec<f64>,
}

impl<'a> HmmTagger<'a> {
    pub fn new(model: &'a HmmModel, smoothing: Smoothing) -> Result<Self> {
        smoothing.validate()?;
        let states: StateSet = model.states().collect();
        if states.is_empty() {
            return Err(Error::InvalidModel("model has no states".into()));
        }
        let n = states.len();

        let start = states
            .iter()
            .map(|s| model.start(s).unwrap_or(0.0).ln())
            .collect();

        /* Transition scores do not depend on the input; compute them once. */
        let mut trans = vec![smoothing.unseen_weight.ln(); n * n];
        for (prev, row) in &model.transition {
            let Some(i) = states.id(prev) else { continue };
            for (curr, &p) in row {
                if let Some(j) = states.id(curr) {
                    trans[n * i + j] = p.ln();
                }
            }
        }

        Ok(Self {
            model,
            smoothing,
            states,
            start,
            trans,
        })
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    fn emission_score(&self, state: &str, word: &str, unseen: f64) -> f64 {
        self.model.emission(state, word).unwrap_or(unseen).ln()
    }

    /// Emission score of the first token. Sentence-initial capitals are
    /// mostly orthographic, so the lower-cased form is tried as well and the
    /// better of the two kept.
    fn first_emission_score(&self, state: &str, word: &str) -> f64 {
        let literal = self.emission_score(state, word, self.smoothing.unseen_first_token_weight);
        match lowercase_first(word) {
            Some(lowered) => {
                literal.max(self.emission_score(state, &lowered, self.smoothing.unseen_weight))
            }
            None => literal,
        }
    }

    fn set_tokens(&self, lattice: &mut Lattice, tokens: &[&str]) {
        let n = self.states.len();
        for (t, word) in tokens.iter().enumerate() {
            for (j, state) in self.states.iter().enumerate() {
                lattice.state[n * t + j] = if t == 0 {
                    self.start[j] + self.first_emission_score(state, word)
                } else {
                    self.emission_score(state, word, self.smoothing.unseen_weight)
                };
            }
        }
    }
}

impl<'a> Tagger for HmmTagger<'a> {
    fn labels(&self) -> Vec<&str> {
        self.states.iter().collect()
    }

    fn viterbi(&self, tokens: &[&str]) -> Result<Prediction> {
        if tokens.is_empty() {
            return Err(Error::EmptySequence);
        }
        let mut lattice = Lattice::new(tokens.len(), self.states.len());
        self.set_tokens(&mut lattice, tokens);
        let mut labels = vec![0; tokens.len()];
        let log_prob = lattice.viterbi(&self.trans, &mut labels);
        let tags = labels
            .into_iter()
            .map(|id| {
                self.states
                    .name(id)
                    .map(str::to_string)
                    .ok_or_else(|| Error::InvalidModel(format!("unknown state id {id}")))
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("{tokens:?} -> {tags:?} ({log_prob})");
        Ok(Prediction { tags, log_prob })
    }
}

/// `word` with its first character lower-cased, if that character is
/// alphabetic.
fn lowercase_first(word: &str) -> Option<String> {
    let mut chars = word.chars();
    let first = chars.next()?;
    if !first.is_alphabetic() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}

/// Loads the model named by `config` and tags its tokens.
pub fn decode(config: &DecoderConfig) -> Result<Prediction> {
    let model = HmmModel::from_path(&config.model_path)?;
    let tagger = HmmTagger::new(&model, config.smoothing)?;
    let tokens: Vec<&str> = config.tokens.iter().map(String::as_str).collect();
    tagger.viterbi(&tokens)
}
