//! # Cipher Breaker Library
//!
//! This library recovers plaintext from classical monoalphabetic ciphers
//! without knowledge of the key, using an n-gram language model as the
//! fitness function.
//!
//! ## Components
//!
//! - **Language model** - log-likelihood scoring of letter strings from a
//!   quadgram (or any fixed-width n-gram) frequency table
//! - **Caesar breaker** - exhaustive search over the 25 non-identity shifts
//! - **Substitution breaker** - stochastic hill climbing over full-alphabet
//!   permutations, single chain or parallel random restarts
//! - **Cipher primitives** - rotation and substitution translations shared
//!   by both breakers
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use cipher_breaker::{break_caesar, LanguageModel};
//!
//! // A model is normally loaded from a large corpus table; three records
//! // are enough to pick the right shift here.
//! let table = "HELL 4\nELLO 3\nLLOW 2\n";
//! let model = LanguageModel::from_reader(Cursor::new(table))?;
//!
//! let result = break_caesar("KHOORZRUOG", &model);
//! assert_eq!(result.shift, 3);
//! assert_eq!(result.plaintext, "HELLOWORLD");
//! # Ok::<(), cipher_breaker::BreakerError>(())
//! ```
//!
//! The model is immutable after loading, so any number of search chains
//! may share one instance across threads without locking.

// Public modules
pub mod breakers;
pub mod cipher;
pub mod error;
pub mod key;
pub mod model;

// Re-exports for easy access
pub use breakers::caesar::{break_caesar, CaesarBreak};
pub use breakers::substitution::{
    break_substitution, break_substitution_restarts, SearchConfig, SearchProgress,
    SubstitutionBreak,
};
pub use cipher::{rotate_decrypt, rotate_encrypt, substitute_decrypt, substitute_encrypt};
pub use error::{BreakerError, Result};
pub use key::{SubstitutionKey, ALPHABET};
pub use model::LanguageModel;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn test_both_breakers_share_one_model() {
        let table = "HELL 4\nELLO 3\nLLOW 2\nOWOR 2\nWORL 2\nORLD 2\n";
        let model = LanguageModel::from_reader(Cursor::new(table)).unwrap();

        let caesar = break_caesar("KHOORZRUOG", &model);
        assert_eq!(caesar.shift, 3);

        let config = SearchConfig {
            max_iterations: 100,
            report_every: 0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let substitution =
            break_substitution("KHOORZRUOG", &model, &config, &mut rng, |_| {});
        assert_eq!(
            substitution.plaintext,
            substitute_decrypt("KHOORZRUOG", &substitution.key)
        );
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
