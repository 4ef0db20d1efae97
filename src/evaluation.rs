use std::{collections::BTreeMap, fmt::Display, iter::zip};

use crate::{
    corpus::Corpus,
    error::Result,
    hmm::{tag::parent_tag, tagger::Tagger},
};

/// Label-wise counts.
#[derive(Debug, Default, Clone, Copy)]
struct LabelMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /// Number of occurrences of the label in the reference data.
    num_observation: usize,
    /// Number of predictions.
    num_prediction: usize,
}

impl LabelMeasure {
    fn precision(&self) -> f64 {
        ratio(self.num_correct, self.num_prediction)
    }

    fn recall(&self) -> f64 {
        ratio(self.num_correct, self.num_observation)
    }

    fn fmeasure(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        }
    }
}

fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// Tagging performance accumulated over reference/prediction pairs.
#[derive(Debug, Default)]
pub struct Evaluation {
    tbl: BTreeMap<String, LabelMeasure>,
    item_total_correct: usize,
    item_total_num: usize,
    inst_total_correct: usize,
    inst_total_num: usize,
}

/// Macro averages over the labels present in the reference data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub item_accuracy: f64,
    pub instance_accuracy: f64,
}

impl Evaluation {
    pub fn accumulate<R: AsRef<str>, P: AsRef<str>>(&mut self, reference: &[R], prediction: &[P]) {
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
            self.item_total_num += 1;
        }
        self.item_total_correct += matched;
        if matched == reference.len() && reference.len() == prediction.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    pub fn evaluate(&self) -> Estimation {
        let observed: Vec<&LabelMeasure> =
            self.tbl.values().filter(|m| m.num_observation > 0).collect();
        let n = observed.len().max(1) as f64;
        Estimation {
            precision: observed.iter().map(|m| m.precision()).sum::<f64>() / n,
            recall: observed.iter().map(|m| m.recall()).sum::<f64>() / n,
            fmeasure: observed.iter().map(|m| m.fmeasure()).sum::<f64>() / n,
            item_accuracy: ratio(self.item_total_correct, self.item_total_num),
            instance_accuracy: ratio(self.inst_total_correct, self.inst_total_num),
        }
    }

    pub fn num_labels(&self) -> usize {
        self.tbl.len()
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) (******, ******, ******)",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation
                )?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    label,
                    lev.num_correct,
                    lev.num_prediction,
                    lev.num_observation,
                    lev.precision(),
                    lev.recall(),
                    lev.fmeasure()
                )?;
            }
        }
        let est = self.evaluate();
        writeln!(
            f,
            "Macro-average precision, recall, F1: ({:.6}, {:.6}, {:.6})",
            est.precision, est.recall, est.fmeasure
        )?;
        writeln!(
            f,
            "Item accuracy: {}/{} => {:.4}",
            self.item_total_correct, self.item_total_num, est.item_accuracy
        )?;
        write!(
            f,
            "Sentence accuracy: {}/{} => {:.4}",
            self.inst_total_correct, self.inst_total_num, est.instance_accuracy
        )
    }
}

/// Tags every sentence of a reference corpus and scores the result. With
/// `coarse`, both sides are collapsed with [`parent_tag`] first.
pub fn evaluate_corpus<T: Tagger>(tagger: &T, corpus: &Corpus, coarse: bool) -> Result<Evaluation> {
    let mut evaluation = Evaluation::default();
    for sentence in &corpus.sentences {
        let prediction = tagger.tag(&sentence.words())?;
        let reference = sentence.tags();
        if coarse {
            let reference: Vec<&str> = reference.into_iter().map(parent_tag).collect();
            let prediction: Vec<&str> = prediction.iter().map(|t| parent_tag(t)).collect();
            evaluation.accumulate(&reference[..], &prediction[..]);
        } else {
            evaluation.accumulate(&reference[..], &prediction[..]);
        }
    }
    Ok(evaluation)
}
