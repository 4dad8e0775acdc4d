//! Stochastic hill-climbing search for substitution keys

use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cipher::substitute_decrypt;
use crate::key::SubstitutionKey;
use crate::model::LanguageModel;

/// Longest decrypted preview handed to the progress callback.
const PREVIEW_LEN: usize = 40;

/// Tuning knobs for the hill-climbing search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of candidate swaps evaluated per chain.
    pub max_iterations: u64,
    /// Progress-callback cadence in iterations; 0 disables reporting.
    pub report_every: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_iterations: 10_000,
            report_every: 1_000,
        }
    }
}

/// Periodic snapshot of a running chain, for diagnostics only.
#[derive(Debug)]
pub struct SearchProgress<'a> {
    pub iteration: u64,
    pub best_score: f64,
    pub preview: &'a str,
}

/// Result of a substitution search: the winning key, its decryption and
/// score.
#[derive(Debug, Clone)]
pub struct SubstitutionBreak {
    pub key: SubstitutionKey,
    pub plaintext: String,
    pub score: f64,
}

/// Hill-climbs a single chain from a random key.
///
/// Each iteration swaps two distinct key positions and keeps the candidate
/// only if it scores strictly higher, so the best score never decreases
/// and the returned key is the best one seen. The search stops after
/// `max_iterations` and may end in a local optimum; run
/// [`break_substitution_restarts`] to trade more compute for better odds.
///
/// `progress` is called every `report_every` iterations; it observes the
/// search but must not influence it. Input shorter than the model's
/// n-gram width gets the neutral result (identity key, input unchanged,
/// score 0).
pub fn break_substitution<R, F>(
    ciphertext: &str,
    model: &LanguageModel,
    config: &SearchConfig,
    rng: &mut R,
    mut progress: F,
) -> SubstitutionBreak
where
    R: Rng,
    F: FnMut(&SearchProgress),
{
    if ciphertext.len() < model.ngram_len() {
        return SubstitutionBreak {
            key: SubstitutionKey::identity(),
            plaintext: ciphertext.to_string(),
            score: 0.0,
        };
    }

    let mut key = SubstitutionKey::random(rng);
    let mut plaintext = substitute_decrypt(ciphertext, &key);
    let mut score = model.score(&plaintext);

    for iteration in 1..=config.max_iterations {
        let a = rng.gen_range(0..26);
        let mut b = rng.gen_range(0..26);
        while b == a {
            b = rng.gen_range(0..26);
        }

        let candidate_key = key.swapped(a, b);
        let candidate_plaintext = substitute_decrypt(ciphertext, &candidate_key);
        let candidate_score = model.score(&candidate_plaintext);

        if candidate_score > score {
            key = candidate_key;
            plaintext = candidate_plaintext;
            score = candidate_score;
        }

        if config.report_every > 0 && iteration % config.report_every == 0 {
            let cut = plaintext.len().min(PREVIEW_LEN);
            progress(&SearchProgress {
                iteration,
                best_score: score,
                preview: &plaintext[..cut],
            });
        }
    }

    SubstitutionBreak {
        key,
        plaintext,
        score,
    }
}

/// Runs `chains` independent hill-climbing chains and keeps the best.
///
/// Chain `i` is seeded with `base_seed + i`, so a fixed base seed makes
/// the whole run reproducible. Chains run on scoped worker threads, each
/// owning its key and score and sharing the read-only model. The reduce
/// step compares in chain order with strictly-greater, so earlier chains
/// win ties.
pub fn break_substitution_restarts(
    ciphertext: &str,
    model: &LanguageModel,
    config: &SearchConfig,
    chains: usize,
    base_seed: u64,
) -> SubstitutionBreak {
    let chains = chains.max(1);

    let mut results: Vec<SubstitutionBreak> = thread::scope(|scope| {
        let handles: Vec<_> = (0..chains)
            .map(|chain| {
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(chain as u64));
                    break_substitution(ciphertext, model, config, &mut rng, |_| {})
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("search chain panicked"))
            .collect()
    });

    let mut best = results.remove(0);
    for result in results {
        if result.score > best.score {
            best = result;
        }
    }
    best
}
