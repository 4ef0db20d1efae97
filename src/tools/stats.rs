use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    corpus::TaggedToken,
    error::{Error, Result},
};

/// Aggregate counts over a word/tag corpus.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetStats {
    /// every line, including those without a tag
    pub total_lines: usize,
    pub unique_words: usize,
    pub tags: BTreeSet<String>,
    pub words_at_least_2: usize,
    pub words_at_least_5: usize,
}

impl DatasetStats {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| Error::io(e, path))?;
        Self::read(BufReader::new(f)).map_err(|e| Error::io(e, path))
    }

    pub fn read<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut total_lines = 0;
        let mut word_counter: HashMap<String, usize> = HashMap::new();
        let mut tags = BTreeSet::new();
        for line in reader.lines() {
            let line = line?;
            total_lines += 1;
            let Some(token) = TaggedToken::parse(&line) else {
                continue;
            };
            *word_counter.entry(token.word).or_default() += 1;
            tags.insert(token.tag);
        }
        Ok(Self {
            total_lines,
            unique_words: word_counter.len(),
            tags,
            words_at_least_2: word_counter.values().filter(|&&c| c >= 2).count(),
            words_at_least_5: word_counter.values().filter(|&&c| c >= 5).count(),
        })
    }
}

impl Display for DatasetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total lines: {}", self.total_lines)?;
        writeln!(f, "Unique words: {}", self.unique_words)?;
        writeln!(f, "Words occurring at least 2 times: {}", self.words_at_least_2)?;
        writeln!(f, "Words occurring at least 5 times: {}", self.words_at_least_5)?;
        writeln!(f, "Unique tags: {}", self.tags.len())?;
        let names: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        write!(f, "Tags: {}", names.join(", "))
    }
}
