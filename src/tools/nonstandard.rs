use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use regex::Regex;

use crate::{
    error::{Error, Result},
    persist::write_atomic,
};

/// A single alphanumeric run, or a single character that is neither
/// alphanumeric nor whitespace.
const STANDARD_TOKEN: &str = r"^([a-zA-Z0-9]+|[^a-zA-Z0-9\s])$";

/// Flags words that need dedicated tokenizer rules.
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    standard: Regex,
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self {
            standard: Regex::new(STANDARD_TOKEN).expect("standard token pattern compiles"),
        }
    }
}

impl TokenClassifier {
    pub fn is_non_standard(&self, word: &str) -> bool {
        word.contains('\'') || !self.standard.is_match(word)
    }

    /// Distinct non-standard words of a corpus, sorted. Only the first field
    /// of each non-blank line is considered.
    pub fn collect<R: BufRead>(&self, reader: R) -> std::io::Result<BTreeSet<String>> {
        let mut tokens = BTreeSet::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(word) = line.split_whitespace().next() {
                if self.is_non_standard(word) && !tokens.contains(word) {
                    tokens.insert(word.to_string());
                }
            }
        }
        Ok(tokens)
    }
}

/// Writes the non-standard words of `input` to `output`, one per line.
/// Returns how many were written.
pub fn extract(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let f = File::open(input).map_err(|e| Error::io(e, input))?;
    let tokens = TokenClassifier::default()
        .collect(BufReader::new(f))
        .map_err(|e| Error::io(e, input))?;
    let mut buffer = String::new();
    for token in &tokens {
        buffer.push_str(token);
        buffer.push('\n');
    }
    write_atomic(output, buffer.as_bytes())?;
    log::info!("wrote {} non-standard tokens to {}", tokens.len(), output.display());
    Ok(tokens.len())
}
