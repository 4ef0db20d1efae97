use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    slice,
};

use crate::error::{Error, Result};

/// Single-character words that close a sentence.
pub const END_TOKENS: [&str; 4] = [".", "?", "!", ";"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    /// Parses a `<word> <tag>` record. Fields past the second are ignored;
    /// lines with fewer than two fields yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let word = fields.next()?;
        let tag = fields.next()?;
        Some(Self::new(word, tag))
    }

    #[inline]
    pub fn is_end_of_sentence(&self) -> bool {
        END_TOKENS.contains(&self.word.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<TaggedToken>,
}

impl Sentence {
    pub fn push(&mut self, token: TaggedToken) {
        self.tokens.push(token);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, TaggedToken> {
        self.tokens.iter()
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.word.as_str()).collect()
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.tag.as_str()).collect()
    }
}

impl From<Vec<TaggedToken>> for Sentence {
    fn from(tokens: Vec<TaggedToken>) -> Self {
        Self { tokens }
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a TaggedToken;
    type IntoIter = slice::Iter<'a, TaggedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Rebuilds sentence boundaries from a flat token stream.
///
/// A run of end tokens such as `?` `!` stays attached to the sentence that the
/// first of them closed, so back-to-back punctuation never opens an empty
/// sentence.
#[derive(Debug, Default)]
struct SentenceSplitter {
    sentences: Vec<Sentence>,
    current: Sentence,
    after_end_token: bool,
}

impl SentenceSplitter {
    fn push(&mut self, token: TaggedToken) {
        if !token.is_end_of_sentence() {
            self.current.push(token);
            self.after_end_token = false;
            return;
        }
        match self.sentences.last_mut() {
            Some(last) if self.after_end_token => last.push(token),
            _ => {
                self.current.push(token);
                self.sentences.push(std::mem::take(&mut self.current));
            }
        }
        self.after_end_token = true;
    }

    fn finish(mut self) -> Vec<Sentence> {
        if !self.current.is_empty() {
            self.sentences.push(self.current);
        }
        self.sentences
    }
}

/// Sentences reconstructed from a word/tag corpus, along with the number of
/// lines that had to be dropped.
#[derive(Debug, Default)]
pub struct Corpus {
    pub sentences: Vec<Sentence>,
    pub total_lines: usize,
    pub skipped_lines: usize,
}

impl Corpus {
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| Error::io(e, path))?;
        let corpus = Self::read(BufReader::new(f)).map_err(|e| Error::io(e, path))?;
        log::info!(
            "read {} sentences ({} tokens) from {}",
            corpus.len(),
            corpus.total_tokens(),
            path.display()
        );
        Ok(corpus)
    }

    pub fn read<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut builder = CorpusBuilder::default();
        for line in reader.lines() {
            builder.push_line(&line?);
        }
        Ok(builder.finish())
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn total_tokens(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Corpus {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut builder = CorpusBuilder::default();
        for line in iter {
            builder.push_line(line.as_ref());
        }
        builder.finish()
    }
}

#[derive(Debug, Default)]
struct CorpusBuilder {
    splitter: SentenceSplitter,
    total_lines: usize,
    skipped_lines: usize,
}

impl CorpusBuilder {
    fn push_line(&mut self, line: &str) {
        self.total_lines += 1;
        match TaggedToken::parse(line) {
            Some(token) => self.splitter.push(token),
            None => {
                log::debug!("skipping line {}: {line:?}", self.total_lines);
                self.skipped_lines += 1;
            }
        }
    }

    fn finish(self) -> Corpus {
        if self.skipped_lines > 0 {
            log::warn!(
                "skipped {} of {} lines without a word/tag pair",
                self.skipped_lines,
                self.total_lines
            );
        }
        Corpus {
            sentences: self.splitter.finish(),
            total_lines: self.total_lines,
            skipped_lines: self.skipped_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &Sentence) -> Vec<&str> {
        s.words()
    }

    #[test]
    fn parse_line() {
        assert_eq!(TaggedToken::parse("dog NN"), Some(TaggedToken::new("dog", "NN")));
        assert_eq!(TaggedToken::parse("  dog\tNN  extra "), Some(TaggedToken::new("dog", "NN")));
        assert_eq!(TaggedToken::parse("dog"), None);
        assert_eq!(TaggedToken::parse("   "), None);
    }

    #[test]
    fn end_tokens_are_single_characters() {
        assert!(TaggedToken::new(".", ".").is_end_of_sentence());
        assert!(TaggedToken::new(";", ":").is_end_of_sentence());
        assert!(!TaggedToken::new("...", ":").is_end_of_sentence());
        assert!(!TaggedToken::new("?!", ".").is_end_of_sentence());
    }

    #[test]
    fn terminal_punctuation_runs_merge() {
        let corpus: Corpus = "A N1\n. PUNCT\nB N2\n? PUNCT\n! PUNCT\nC N3".lines().collect();
        assert_eq!(corpus.len(), 3);
        assert_eq!(words(&corpus.sentences[0]), ["A", "."]);
        assert_eq!(words(&corpus.sentences[1]), ["B", "?", "!"]);
        assert_eq!(words(&corpus.sentences[2]), ["C"]);
        assert_eq!(corpus.total_tokens(), 6);
    }

    #[test]
    fn leading_end_token_forms_a_sentence() {
        let corpus: Corpus = [". .", "; :", "x X"].into_iter().collect();
        assert_eq!(corpus.len(), 2);
        assert_eq!(words(&corpus.sentences[0]), [".", ";"]);
        assert_eq!(words(&corpus.sentences[1]), ["x"]);
    }

    #[test]
    fn malformed_lines_are_counted() {
        let corpus: Corpus = ["the DT", "orphan", "", "dog NN", ". ."].into_iter().collect();
        assert_eq!(corpus.total_lines, 5);
        assert_eq!(corpus.skipped_lines, 2);
        assert_eq!(corpus.len(), 1);
        assert_eq!(words(&corpus.sentences[0]), ["the", "dog", "."]);
    }

    #[test]
    fn read_missing_file() {
        match Corpus::read_file("does/not/exist.txt") {
            Err(Error::Io { path: p, .. }) => assert!(p.ends_with("exist.txt")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
