pub mod counts;
pub mod estimator;
mod lattice;
pub mod model;
pub mod states;
pub mod tag;
pub mod tagger;
