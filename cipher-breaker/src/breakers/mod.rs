//! Key-search algorithms built on the language model

pub mod caesar;
pub mod substitution;

pub use caesar::*;
pub use substitution::*;
