//! Corpus and dictionary utilities used while preparing tagger data.

pub mod dictionary;
pub mod nonstandard;
pub mod stats;
