use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use super::counts::ProbabilityTable;
use crate::{
    error::{Error, Result},
    persist::write_atomic,
};

/// The persisted HMM: start, emission and transition distributions.
///
/// Only observed events are stored. Smoothing of unseen events is a decoding
/// concern and never written into the model.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HmmModel {
    /// tag -> probability of starting a sentence
    pub start_prob: ProbabilityTable,
    /// tag -> word -> probability
    pub emission: BTreeMap<String, ProbabilityTable>,
    /// previous tag -> tag -> probability
    pub transition: BTreeMap<String, ProbabilityTable>,
}

impl HmmModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let buffer = fs::read(path).map_err(|e| Error::io(e, path))?;
        let model = Self::from_memory(&buffer)?;
        log::info!(
            "loaded model from {} ({} states)",
            path.display(),
            model.num_states()
        );
        Ok(model)
    }

    pub fn from_memory(buffer: &[u8]) -> Result<Self> {
        let model: Self =
            serde_json::from_slice(buffer).map_err(|e| Error::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Checks that every stored value is a probability.
    pub fn validate(&self) -> Result<()> {
        let check = |field: &str, key: &str, p: f64| {
            if p.is_finite() && (0.0..=1.0).contains(&p) {
                Ok(())
            } else {
                Err(Error::InvalidModel(format!(
                    "{field}[{key:?}] = {p} is not a probability"
                )))
            }
        };
        for (tag, &p) in &self.start_prob {
            check("start_prob", tag, p)?;
        }
        for (field, table) in [("emission", &self.emission), ("transition", &self.transition)] {
            for (outer, row) in table {
                for (inner, &p) in row {
                    check(field, format!("{outer}/{inner}").as_str(), p)?;
                }
            }
        }
        Ok(())
    }

    /// Writes the model as pretty-printed JSON. A failed write leaves any
    /// previous model at `path` untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let buffer = serde_json::to_vec_pretty(self)?;
        write_atomic(path, &buffer)?;
        log::info!("wrote model to {}", path.display());
        Ok(())
    }

    /// Tags the decoder can produce, in lexicographic order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.emission.keys().map(String::as_str)
    }

    pub fn num_states(&self) -> usize {
        self.emission.len()
    }

    pub fn start(&self, tag: &str) -> Option<f64> {
        self.start_prob.get(tag).copied()
    }

    pub fn emission(&self, tag: &str, word: &str) -> Option<f64> {
        self.emission.get(tag)?.get(word).copied()
    }

    pub fn transition(&self, prev: &str, tag: &str) -> Option<f64> {
        self.transition.get(prev)?.get(tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "start_prob": {"DT": 1.0},
        "emission": {"DT": {"the": 0.5, "a": 0.5}, "NN": {"dog": 1.0}},
        "transition": {"DT": {"NN": 1.0}}
    }"#;

    #[test]
    fn load_from_memory() {
        let model = HmmModel::from_memory(MODEL.as_bytes()).unwrap();
        assert_eq!(model.states().collect::<Vec<_>>(), ["DT", "NN"]);
        assert_eq!(model.start("DT"), Some(1.0));
        assert_eq!(model.start("NN"), None);
        assert_eq!(model.emission("DT", "a"), Some(0.5));
        assert_eq!(model.emission("DT", "dog"), None);
        assert_eq!(model.emission("VB", "dog"), None);
        assert_eq!(model.transition("DT", "NN"), Some(1.0));
        assert_eq!(model.transition("NN", "DT"), None);
    }

    #[test]
    fn invalid_models() {
        for buffer in [
            "",
            "abcdefg",
            "[]",
            r#"{"start_prob": {}, "emission": {}}"#,
            r#"{"start_prob": {"DT": 1.5}, "emission": {}, "transition": {}}"#,
            r#"{"start_prob": {}, "emission": {"DT": {"a": -0.1}}, "transition": {}}"#,
            r#"{"start_prob": {}, "emission": {"DT": 0.5}, "transition": {}}"#,
        ] {
            match HmmModel::from_memory(buffer.as_bytes()) {
                Err(Error::InvalidModel(..)) => {}
                other => panic!("{buffer:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        match HmmModel::from_path("tests/does-not-exist.json") {
            Err(Error::Io { .. }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("hmm.json");
        let model = HmmModel::from_memory(MODEL.as_bytes()).unwrap();
        model.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        let fields: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(HmmModel::from_path(&path).unwrap(), model);
    }
}
