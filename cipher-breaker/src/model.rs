//! N-gram language model used as the fitness function
//!
//! The model is built once from a frequency table and is read-only
//! afterwards, so breakers on several threads can share one instance
//! without locking.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{BreakerError, Result};

/// Numerator of the default floor probability for n-grams absent from the
/// table: `log10(0.01 / total)` is strictly below every tabulated value.
pub const DEFAULT_FLOOR_NUMERATOR: f64 = 0.01;

/// Statistical language model over fixed-width letter n-grams.
///
/// Each tabulated n-gram carries `log10(count / total)`; any other n-gram
/// scores the floor value. Higher scores mean more plausible English.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    log_probs: HashMap<String, f64>,
    ngram_len: usize,
    floor: f64,
    skipped: usize,
}

impl LanguageModel {
    /// Loads a frequency table from a file of `NGRAM COUNT` lines.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the frequency table resource.
    ///
    /// # Errors
    ///
    /// `ModelRead` if the file is missing or unreadable, `EmptyModel` if no
    /// line parses as a record.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Same as [`load`](Self::load) with an explicit floor numerator.
    pub fn load_with_floor<P: AsRef<Path>>(path: P, floor_numerator: f64) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader_with_floor(BufReader::new(file), floor_numerator)
    }

    /// Parses a frequency table from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_floor(reader, DEFAULT_FLOOR_NUMERATOR)
    }

    /// Parses a frequency table, deriving log-probabilities and the floor
    /// value for unseen n-grams.
    ///
    /// The n-gram width is inferred from the first valid record; every
    /// later record of a different width is malformed. Malformed lines are
    /// skipped and counted, not fatal. `floor_numerator` must lie in
    /// (0, 1) so the floor stays below every tabulated log-probability.
    pub fn from_reader_with_floor<R: BufRead>(reader: R, floor_numerator: f64) -> Result<Self> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut ngram_len = 0;
        let mut skipped = 0;

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(&line, &mut ngram_len) {
                Some((ngram, count)) => {
                    // A zero count carries no information; the floor
                    // already covers "seen never".
                    if count > 0 {
                        *counts.entry(ngram).or_insert(0) += count;
                    }
                }
                None => skipped += 1,
            }
        }

        if counts.is_empty() {
            return Err(BreakerError::EmptyModel);
        }

        let total: u64 = counts.values().sum();
        let total = total as f64;
        let log_probs = counts
            .into_iter()
            .map(|(ngram, count)| (ngram, (count as f64 / total).log10()))
            .collect();

        Ok(LanguageModel {
            log_probs,
            ngram_len,
            floor: (floor_numerator / total).log10(),
            skipped,
        })
    }

    /// Sums the log-probabilities of every window of `ngram_len` letters,
    /// sliding with stride 1. Text shorter than the window scores 0.
    pub fn score(&self, text: &str) -> f64 {
        if text.len() < self.ngram_len {
            return 0.0;
        }

        let mut total = 0.0;
        for start in 0..=text.len() - self.ngram_len {
            let window = &text[start..start + self.ngram_len];
            total += self.log_probs.get(window).copied().unwrap_or(self.floor);
        }
        total
    }

    /// Width of the n-grams this model was built from.
    pub fn ngram_len(&self) -> usize {
        self.ngram_len
    }

    /// Log-probability assigned to n-grams absent from the table.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Number of distinct n-grams in the table.
    pub fn len(&self) -> usize {
        self.log_probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_probs.is_empty()
    }

    /// Number of malformed lines skipped while loading.
    pub fn skipped_records(&self) -> usize {
        self.skipped
    }
}

/// Parses one `NGRAM COUNT` line. The first valid record fixes the n-gram
/// width through `ngram_len`.
fn parse_record(line: &str, ngram_len: &mut usize) -> Option<(String, u64)> {
    let mut fields = line.split_whitespace();
    let ngram = fields.next()?;
    let count = fields.next()?.parse::<u64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    if !ngram.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    if *ngram_len == 0 {
        *ngram_len = ngram.len();
    } else if ngram.len() != *ngram_len {
        return None;
    }
    Some((ngram.to_string(), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn model_from(records: &str) -> LanguageModel {
        LanguageModel::from_reader(Cursor::new(records)).unwrap()
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_width_inferred_from_first_record() {
        let model = model_from("TION 100\nATIO 80\n");
        assert_eq!(model.ngram_len(), 4);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_malformed_lines_skipped_with_count() {
        // One valid record, two malformed lines: loading still succeeds.
        let model = model_from("TION 100\nnot-a-record\nTOOLONG 5\n");
        assert_eq!(model.len(), 1);
        assert_eq!(model.skipped_records(), 2);
    }

    #[test]
    fn test_zero_valid_records_is_fatal() {
        let result = LanguageModel::from_reader(Cursor::new("garbage\nmore garbage\n"));
        assert!(matches!(result, Err(BreakerError::EmptyModel)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = LanguageModel::load("/no/such/quadgrams.txt");
        assert!(matches!(result, Err(BreakerError::ModelRead(_))));
    }

    #[test]
    fn test_blank_lines_are_not_malformed() {
        let model = model_from("TION 100\n\n   \nATIO 80\n");
        assert_eq!(model.len(), 2);
        assert_eq!(model.skipped_records(), 0);
    }

    #[test]
    fn test_duplicate_records_accumulate() {
        let model = model_from("AB 3\nAB 1\n");
        // 4 of 4 observations: log10(1).
        assert!(approx_eq(model.score("AB"), 0.0));
    }

    #[test]
    fn test_score_sums_overlapping_windows() {
        let model = model_from("AB 2\nBC 1\nCD 1\n");
        let expected = (2.0f64 / 4.0).log10() + (1.0f64 / 4.0).log10();
        assert!(approx_eq(model.score("ABC"), expected));
    }

    #[test]
    fn test_unseen_ngram_scores_floor() {
        let model = model_from("AB 2\nBC 1\nCD 1\n");
        let expected = (0.01f64 / 4.0).log10();
        assert!(approx_eq(model.score("XY"), expected));
        assert!(approx_eq(model.floor(), expected));
    }

    #[test]
    fn test_floor_below_every_tabulated_value() {
        let model = model_from("AA 1\nBB 500\nCC 2\n");
        let rarest = (1.0f64 / 503.0).log10();
        assert!(model.floor() < rarest);
    }

    #[test]
    fn test_short_text_scores_zero() {
        let model = model_from("TION 100\n");
        assert!(approx_eq(model.score(""), 0.0));
        assert!(approx_eq(model.score("TIO"), 0.0));
    }

    #[test]
    fn test_score_is_deterministic() {
        let model = model_from("TH 20\nHE 15\nER 10\n");
        let text = "THERMOMETER";
        assert!(approx_eq(model.score(text), model.score(text)));
    }

    #[test]
    fn test_custom_floor_numerator() {
        let model =
            LanguageModel::from_reader_with_floor(Cursor::new("AB 9\nCD 1\n"), 0.5).unwrap();
        assert!(approx_eq(model.floor(), (0.5f64 / 10.0).log10()));
    }
}
