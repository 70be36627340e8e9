//! Polycrack - break repeating-key ciphers without the key
//!
//! CLI around the cryptanalysis pipeline: crack a ciphertext, or
//! encrypt/decrypt with a known key for experimenting.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use polycrack::solver::{AutoSelector, CandidateSelector, ShiftHypothesis};
use polycrack::{cipher, Cracker, Language};

/// Polycrack - break repeating-key ciphers without the key
///
/// Classical statistical cryptanalysis of Vigenère-family ciphers:
/// Kasiski examination, index of coincidence and frequency alignment.
#[derive(Parser)]
#[command(name = "polycrack")]
#[command(version)]
#[command(about = "Break repeating-key (Vigenère-family) ciphers without the key")]
struct Cli {
    /// Increase diagnostic verbosity (debug-level tracing)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover the key and plaintext of a ciphertext
    Crack {
        /// Target language of the plaintext (english or spanish)
        #[arg(short, long, default_value = "english")]
        language: Language,

        /// Input file with the ciphertext (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the key and plaintext (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use this period instead of estimating it
        #[arg(short, long)]
        period: Option<usize>,

        /// Choose the shift for each subsequence interactively
        #[arg(short, long)]
        manual: bool,

        /// Reject input containing letters outside the alphabet
        #[arg(long)]
        strict: bool,

        /// Print the result as JSON
        #[arg(long, conflicts_with = "manual")]
        json: bool,
    },

    /// Encrypt a text with a known key
    Encrypt {
        /// The key (letters of the chosen language's alphabet)
        #[arg(short, long)]
        key: String,

        /// Language whose alphabet to use (english or spanish)
        #[arg(short, long, default_value = "english")]
        language: Language,

        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a text with a known key
    Decrypt {
        /// The key (letters of the chosen language's alphabet)
        #[arg(short, long)]
        key: String,

        /// Language whose alphabet to use (english or spanish)
        #[arg(short, long, default_value = "english")]
        language: Language,

        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polycrack=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polycrack=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!cli.no_color)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Crack {
            language,
            input,
            output,
            period,
            manual,
            strict,
            json,
        } => crack_cmd(language, input.as_ref(), output.as_ref(), period, manual, strict, json),

        Commands::Encrypt {
            key,
            language,
            input,
            output,
        } => {
            let raw = read_input(input.as_ref())?;
            let encrypted = cipher::encrypt(&raw, &key, language)?;
            write_output(output.as_ref(), &encrypted)
        }

        Commands::Decrypt {
            key,
            language,
            input,
            output,
        } => {
            let raw = read_input(input.as_ref())?;
            let decrypted = cipher::decrypt(&raw, &key, language)?;
            write_output(output.as_ref(), &decrypted)
        }
    }
}

/// Reads the whole input from a file or stdin.
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            eprintln!("Reading text from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Writes a result to a file or stdout.
fn write_output(path: Option<&PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Written to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Runs the crack pipeline, automatically or interactively.
fn crack_cmd(
    language: Language,
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
    period: Option<usize>,
    manual: bool,
    strict: bool,
    json: bool,
) -> Result<()> {
    let raw = read_input(input)?;
    if raw.trim().is_empty() {
        bail!("Ciphertext is empty");
    }

    let cracker = if strict {
        Cracker::new_strict(&raw, language)?
    } else {
        Cracker::new(&raw, language)
    };

    if manual {
        return crack_interactive(&cracker, period, output);
    }

    let result = match cracker.crack(period, &mut AutoSelector) {
        Ok(result) => result,
        Err(err @ polycrack::Error::KasiskiInsufficientData) => {
            bail!("{err}. Supply a period explicitly with --period.")
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        return write_output(output, &serde_json::to_string_pretty(&result)?);
    }

    if !result.candidates.is_empty() {
        eprintln!("Period candidates:");
        for candidate in &result.candidates {
            eprintln!("  {:3}  {:6.2}%", candidate.period, candidate.confidence);
        }
    }
    write_output(
        output,
        &format!("Key: {}\n{}", result.recovery.key, result.recovery.plaintext),
    )
}

/// Manual mode: the user picks the period and, per subsequence, the
/// symbol assumed to encrypt the language's most frequent letter.
fn crack_interactive(
    cracker: &Cracker,
    period: Option<usize>,
    output: Option<&PathBuf>,
) -> Result<()> {
    match cracker.guess_periods() {
        Ok(candidates) => {
            println!("Period candidates:");
            for candidate in &candidates {
                println!("  {:3}  {:6.2}%", candidate.period, candidate.confidence);
            }
        }
        Err(err) => println!("Period estimation failed ({err}); pick one yourself."),
    }

    let mut default_period = period;
    loop {
        let period = match default_period.take() {
            Some(period) => period,
            None => prompt_number("Introduce period: ")?,
        };

        let mut selector = InteractiveSelector {
            most_frequent: cracker.profile().most_frequent_letter(),
        };
        match cracker.recover(period, &mut selector) {
            Ok(recovery) => {
                println!("\nKey: {}", recovery.key);
                println!("{}", preview(&recovery.plaintext, 1000));

                if !prompt_yes("\nTry another period [y/N]: ") {
                    return write_output(
                        output,
                        &format!("Key: {}\n{}", recovery.key, recovery.plaintext),
                    );
                }
            }
            Err(err) => println!("Recovery failed: {err}"),
        }
    }
}

/// Interactive shift choice, one prompt per subsequence.
struct InteractiveSelector {
    most_frequent: char,
}

impl CandidateSelector for InteractiveSelector {
    fn choose(
        &mut self,
        subsequence: usize,
        hypotheses: &[ShiftHypothesis],
    ) -> polycrack::Result<char> {
        println!("\nSubsequence {subsequence}. Possible encryptions of {}:", self.most_frequent);
        for hypothesis in hypotheses {
            println!(
                "  {}  ({} occurrences, {:.2}%)",
                hypothesis.symbol, hypothesis.occurrences, hypothesis.score
            );
        }

        loop {
            print!("Encryption of {}: ", self.most_frequent);
            let Some(answer) = read_input_line() else {
                return Err(polycrack::Error::SelectionAborted);
            };
            match answer.trim().chars().next() {
                Some(c) => return Ok(c),
                None => println!("Type a letter."),
            }
        }
    }
}

/// Prompts until the user types a number; fails when stdin closes.
fn prompt_number(prompt: &str) -> Result<usize> {
    loop {
        print!("{prompt}");
        let answer = read_input_line()
            .ok_or_else(|| anyhow!("Standard input closed before a period was chosen"))?;
        match answer.trim().parse() {
            Ok(n) => return Ok(n),
            Err(_) => println!("Type a number."),
        }
    }
}

/// Asks a yes/no question; an empty answer or closed stdin means no.
fn prompt_yes(prompt: &str) -> bool {
    print!("{prompt}");
    match read_input_line() {
        Some(answer) => answer.trim().eq_ignore_ascii_case("y"),
        None => false,
    }
}

/// Flushes stdout and reads one line from stdin.
///
/// None when stdin is closed or unreadable, so prompt loops terminate
/// instead of spinning on an empty line.
fn read_input_line() -> Option<String> {
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// Truncates long plaintext for on-screen preview.
fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}
