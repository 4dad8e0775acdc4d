use std::process;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use cipher_breaker::{
    LanguageModel, SearchConfig, break_caesar, break_substitution, break_substitution_restarts,
};

/// Command-line arguments for the n-gram decryptor program.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file containing encrypted text
    #[arg(short, long, help = "Path to the input file containing encrypted text")]
    file: String,

    /// Path to the n-gram frequency table
    #[arg(short, long, help = "Path to the n-gram frequency table")]
    ngrams: String,

    /// Encoding of the input file
    #[arg(long, value_enum, default_value_t = InputFormat::Text, help = "Encoding of the input file")]
    format: InputFormat,

    /// Cipher family to break
    #[arg(short, long, value_enum, default_value_t = CipherKind::Both, help = "Cipher family to break")]
    cipher: CipherKind,

    /// Hill-climbing iterations per chain
    #[arg(short, long, default_value_t = 10_000, help = "Hill-climbing iterations per chain")]
    iterations: u64,

    /// Search strategy for the substitution breaker
    #[arg(long, value_enum, default_value_t = Strategy::Restarts, help = "Search strategy for the substitution breaker")]
    strategy: Strategy,

    /// Number of random-restart chains
    #[arg(long, default_value_t = 4, help = "Number of random-restart chains")]
    chains: usize,

    /// Base seed for reproducible runs
    #[arg(long, help = "Base seed for reproducible runs")]
    seed: Option<u64>,

    /// Path to the output file for decrypted text
    #[arg(short, long, help = "Path to the output file for decrypted text")]
    output: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    /// Whitespace-separated blocks of binary ASCII codes
    Binary,
    /// Plain text
    Text,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CipherKind {
    Caesar,
    Substitution,
    Both,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// One hill-climbing chain with progress output
    Single,
    /// Several independently seeded chains, best result kept
    Restarts,
}

fn main() {
    let cli: Cli = Cli::parse();

    // Read and decode the ciphertext, then reduce it to uppercase letters
    let raw: String =
        std::fs::read_to_string(&cli.file).expect("Failed to read the input file");
    let decoded = match cli.format {
        InputFormat::Binary => binary_to_ascii(&raw),
        InputFormat::Text => raw,
    };
    let ciphertext = clean_for_cipher(&decoded);
    if ciphertext.is_empty() {
        eprintln!("Warning: input contains no alphabetic characters");
    }

    // The pipeline cannot continue without a model
    let model = match LanguageModel::load(&cli.ngrams) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };
    if model.skipped_records() > 0 {
        eprintln!(
            "Warning: skipped {} malformed n-gram records",
            model.skipped_records()
        );
    }
    println!(
        "Loaded {} {}-grams from {}",
        model.len(),
        model.ngram_len(),
        cli.ngrams
    );

    let mut best: Option<(f64, String)> = None;

    if matches!(cli.cipher, CipherKind::Caesar | CipherKind::Both) {
        let result = break_caesar(&ciphertext, &model);
        println!("--- Caesar search ---");
        println!("Best shift: {}", result.shift);
        println!("Score: {:.2}", result.score);
        println!("Plaintext: {}", result.plaintext);
        best = keep_better(best, result.score, result.plaintext);
    }

    if matches!(cli.cipher, CipherKind::Substitution | CipherKind::Both) {
        let config = SearchConfig {
            max_iterations: cli.iterations,
            ..SearchConfig::default()
        };
        let seed = cli.seed.unwrap_or_else(rand::random);

        let result = match cli.strategy {
            Strategy::Single => {
                let mut rng = StdRng::seed_from_u64(seed);
                break_substitution(&ciphertext, &model, &config, &mut rng, |p| {
                    println!(
                        "iteration {:>7}  score {:>12.2}  {}",
                        p.iteration, p.best_score, p.preview
                    );
                })
            }
            Strategy::Restarts => {
                break_substitution_restarts(&ciphertext, &model, &config, cli.chains, seed)
            }
        };
        println!("--- Substitution search ---");
        println!("Cipher alphabet: {}", result.key);
        println!("Score: {:.2}", result.score);
        println!("Plaintext: {}", result.plaintext);
        best = keep_better(best, result.score, result.plaintext);
    }

    // Persist the overall best decryption when asked to
    if let (Some(path), Some((_, plaintext))) = (&cli.output, &best) {
        std::fs::write(path, plaintext).expect("Failed to write the output file");
    }
}

/// Converts whitespace-separated blocks of binary ASCII codes to text.
///
/// # Arguments
///
/// * `raw` - The raw file content, e.g. `"1001000 1101001"`.
///
/// # Returns
///
/// The decoded text; blocks that are not valid binary are skipped with a
/// warning.
fn binary_to_ascii(raw: &str) -> String {
    let mut text = String::new();
    for block in raw.split_whitespace() {
        match u8::from_str_radix(block, 2) {
            Ok(code) => text.push(code as char),
            Err(_) => eprintln!("Warning: invalid binary block '{block}', skipping"),
        }
    }
    text
}

/// Keeps only alphabetic characters and converts them to uppercase, the
/// form both breakers expect.
fn clean_for_cipher(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Keeps whichever of the current best and the new candidate scores higher.
fn keep_better(
    current: Option<(f64, String)>,
    score: f64,
    plaintext: String,
) -> Option<(f64, String)> {
    match current {
        Some((best_score, _)) if best_score >= score => current,
        _ => Some((score, plaintext)),
    }
}
