//! Exhaustive search over Caesar shifts

use crate::cipher::rotate_decrypt;
use crate::model::LanguageModel;

/// Result of a Caesar search: the winning shift, its decryption and score.
#[derive(Debug, Clone)]
pub struct CaesarBreak {
    pub shift: u8,
    pub plaintext: String,
    pub score: f64,
}

/// Tries every shift from 1 to 25 and returns the best-scoring decryption.
///
/// The identity shift is excluded: it can never be the intended
/// encryption. Comparison is strictly greater, so with tied scores the
/// smallest shift wins. Input shorter than the model's n-gram width gets
/// the neutral result (shift 0, input unchanged, score 0).
pub fn break_caesar(ciphertext: &str, model: &LanguageModel) -> CaesarBreak {
    if ciphertext.len() < model.ngram_len() {
        return CaesarBreak {
            shift: 0,
            plaintext: ciphertext.to_string(),
            score: 0.0,
        };
    }

    let mut best = CaesarBreak {
        shift: 0,
        plaintext: ciphertext.to_string(),
        score: f64::NEG_INFINITY,
    };

    for shift in 1..=25 {
        let plaintext = rotate_decrypt(ciphertext, shift);
        let score = model.score(&plaintext);
        if score > best.score {
            best = CaesarBreak {
                shift,
                plaintext,
                score,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::rotate_encrypt;
    use std::collections::HashMap;
    use std::io::Cursor;

    /// Builds a quadgram table from the n-grams of a training text.
    fn quadgram_model(training: &str) -> LanguageModel {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for start in 0..=training.len() - 4 {
            *counts.entry(&training[start..start + 4]).or_insert(0) += 1;
        }
        let mut records = String::new();
        for (ngram, count) in counts {
            records.push_str(&format!("{ngram} {count}\n"));
        }
        LanguageModel::from_reader(Cursor::new(records)).unwrap()
    }

    #[test]
    fn test_recovers_shift_three() {
        let model = quadgram_model("HELLOWORLD");
        let ciphertext = rotate_encrypt("HELLOWORLD", 3);
        assert_eq!(ciphertext, "KHOORZRUOG");

        let result = break_caesar(&ciphertext, &model);
        assert_eq!(result.shift, 3);
        assert_eq!(result.plaintext, "HELLOWORLD");
    }

    #[test]
    fn test_recovers_every_shift() {
        let plaintext = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";
        let model = quadgram_model(plaintext);
        for shift in 1..=25 {
            let result = break_caesar(&rotate_encrypt(plaintext, shift), &model);
            assert_eq!(result.shift, shift);
            assert_eq!(result.plaintext, plaintext);
        }
    }

    #[test]
    fn test_ties_go_to_the_smallest_shift() {
        // No decryption of this text hits the table, so all 25 shifts
        // score the same floor sum and the first one must win.
        let model = quadgram_model("AAAAAA");
        let result = break_caesar("BCDEFGHIJK", &model);
        assert_eq!(result.shift, 1);
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let model = quadgram_model("HELLOWORLD");
        let result = break_caesar("", &model);
        assert_eq!(result.shift, 0);
        assert_eq!(result.plaintext, "");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_input_shorter_than_window_is_neutral() {
        let model = quadgram_model("HELLOWORLD");
        let result = break_caesar("XYZ", &model);
        assert_eq!(result.shift, 0);
        assert_eq!(result.plaintext, "XYZ");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_best_score_matches_model() {
        let model = quadgram_model("HELLOWORLD");
        let result = break_caesar("KHOORZRUOG", &model);
        assert_eq!(result.score, model.score(&result.plaintext));
    }
}
