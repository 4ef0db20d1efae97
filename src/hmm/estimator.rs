use std::{fmt::Display, time::Instant};

use super::{
    counts::{FrequencyTable, NestedFrequencyTable},
    model::HmmModel,
};
use crate::{
    config::EstimatorConfig,
    corpus::{Corpus, Sentence},
    error::Result,
};

/// Accumulates start, transition and emission counts over sentences.
#[derive(Debug, Default)]
pub struct Estimator {
    start_counts: FrequencyTable,
    transition_counts: NestedFrequencyTable,
    emission_counts: NestedFrequencyTable,
    num_sentences: usize,
    num_tokens: usize,
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, sentence: &Sentence) {
        let mut prev: Option<&str> = None;
        for token in sentence {
            self.emission_counts.add(&token.tag, &token.word);
            match prev {
                None => self.start_counts.add(&token.tag),
                Some(p) => self.transition_counts.add(p, &token.tag),
            }
            prev = Some(&token.tag);
        }
        if !sentence.is_empty() {
            self.num_sentences += 1;
            self.num_tokens += sentence.len();
        }
    }

    pub fn accumulate_corpus(&mut self, corpus: &Corpus) {
        for sentence in &corpus.sentences {
            self.accumulate(sentence);
        }
    }

    pub fn start_counts(&self) -> &FrequencyTable {
        &self.start_counts
    }

    pub fn transition_counts(&self) -> &NestedFrequencyTable {
        &self.transition_counts
    }

    pub fn emission_counts(&self) -> &NestedFrequencyTable {
        &self.emission_counts
    }

    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    /// Number of distinct words over all tags.
    pub fn vocabulary_size(&self) -> usize {
        let mut words: Vec<&str> = self
            .emission_counts
            .rows()
            .flat_map(|(_, row)| row.keys())
            .collect();
        words.sort_unstable();
        words.dedup();
        words.len()
    }

    pub fn normalize(&self) -> HmmModel {
        HmmModel {
            start_prob: self.start_counts.normalize(),
            emission: self.emission_counts.normalize(),
            transition: self.transition_counts.normalize(),
        }
    }
}

/// Summary of one estimation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationReport {
    pub lines: usize,
    pub skipped_lines: usize,
    pub sentences: usize,
    pub tokens: usize,
    pub tags: usize,
    pub vocabulary: usize,
}

impl Display for EstimationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lines read: {} ({} skipped)", self.lines, self.skipped_lines)?;
        writeln!(f, "Sentences: {}", self.sentences)?;
        writeln!(f, "Tokens: {}", self.tokens)?;
        writeln!(f, "Tags: {}", self.tags)?;
        write!(f, "Vocabulary: {}", self.vocabulary)
    }
}

/// Counts and normalizes a whole corpus.
pub fn estimate(corpus: &Corpus) -> (HmmModel, EstimationReport) {
    let begin = Instant::now();
    let mut estimator = Estimator::new();
    estimator.accumulate_corpus(corpus);
    let model = estimator.normalize();
    let report = EstimationReport {
        lines: corpus.total_lines,
        skipped_lines: corpus.skipped_lines,
        sentences: estimator.num_sentences(),
        tokens: estimator.num_tokens(),
        tags: model.num_states(),
        vocabulary: estimator.vocabulary_size(),
    };
    log::info!(
        "estimated {} tags over {} sentences, time cost: {:?}",
        report.tags,
        report.sentences,
        begin.elapsed()
    );
    (model, report)
}

/// Reads the corpus, estimates the model and writes it. Nothing is written
/// unless the whole corpus was read.
pub fn train(config: &EstimatorConfig) -> Result<EstimationReport> {
    let corpus = Corpus::read_file(&config.corpus_path)?;
    let (model, report) = estimate(&corpus);
    model.save(&config.model_output_path)?;
    Ok(report)
}
