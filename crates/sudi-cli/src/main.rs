//! Sudi command-line tagger
//!
//! Trains an HMM from an aligned tag/word corpus, then evaluates it on a
//! reference set, tags a batch of sentences, or tags sentences typed at the
//! console.

mod commands;
mod interactive;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sudi_core::{SentenceTerminator, Tagger, TaggerConfig};
use tracing::{info, Level};

/// CLI arguments
#[derive(Parser)]
#[command(name = "sudi")]
#[command(about = "Train an HMM part-of-speech tagger and tag sentences with Viterbi")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Training tag file, one sentence of tags per line
    #[arg(long, env = "SUDI_TRAIN_TAGS")]
    train_tags: PathBuf,

    /// Training sentence file, aligned with the tag file
    #[arg(long, env = "SUDI_TRAIN_SENTENCES")]
    train_sentences: PathBuf,

    /// Log-score for words a tag never emitted in training
    #[arg(
        long,
        env = "SUDI_UNSEEN_PENALTY",
        default_value_t = sudi_core::decoder::DEFAULT_UNSEEN_PENALTY,
        allow_negative_numbers = true
    )]
    penalty: f64,

    /// Final word that pins the final tag
    #[arg(long, default_value = ".")]
    terminator_word: String,

    /// Tag pinned when a sentence ends with the terminator word
    #[arg(long, default_value = ".")]
    terminator_tag: String,

    /// Always end in the best-scoring tag
    #[arg(long, conflicts_with_all = ["terminator_word", "terminator_tag"])]
    no_terminator: bool,

    /// Count the last token of each training sentence as an ordinary emission
    #[arg(long)]
    final_token_emissions: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag a reference set and report accuracy
    Evaluate {
        /// Sentences to tag
        #[arg(long)]
        test_sentences: PathBuf,

        /// Reference tags, aligned with the sentences
        #[arg(long)]
        test_tags: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Report the percentage truncated to an integer
        #[arg(long)]
        truncate: bool,
    },
    /// Tag each line of a file, or of stdin
    Tag {
        /// Input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Tag sentences typed at the console
    Interactive,
}

impl Cli {
    fn tagger_config(&self) -> TaggerConfig {
        let terminator = (!self.no_terminator).then(|| {
            SentenceTerminator::new(self.terminator_word.clone(), self.terminator_tag.clone())
        });

        TaggerConfig::new()
            .with_unseen_penalty(self.penalty)
            .with_terminator(terminator)
            .with_final_token_emissions(self.final_token_emissions)
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let tagger = Tagger::from_paths(&cli.train_tags, &cli.train_sentences, cli.tagger_config())
        .context("Failed to train tagger")?;
    info!(tags = tagger.model().num_tags(), "tagger ready");

    match cli.command {
        Commands::Evaluate {
            test_sentences,
            test_tags,
            json,
            truncate,
        } => commands::evaluate(&tagger, &test_sentences, &test_tags, json, truncate),
        Commands::Tag { input, json } => commands::tag(&tagger, input.as_deref(), json),
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            interactive::run(&tagger, stdin.lock(), stdout.lock())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["sudi", "--train-tags", "tags.txt", "--train-sentences", "words.txt"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_default_config() {
        let cli = parse(&["interactive"]);
        let config = cli.tagger_config();

        assert_eq!(config.decoder.unseen_penalty, -100.0);
        assert_eq!(config.decoder.terminator, Some(SentenceTerminator::period()));
        assert!(!config.estimator.final_token_emissions);
        assert_eq!(log_level(cli.verbose), Level::WARN);
    }

    #[test]
    fn test_config_flags() {
        let cli = parse(&[
            "--penalty",
            "-42.5",
            "--no-terminator",
            "--final-token-emissions",
            "-vv",
            "tag",
            "--json",
        ]);
        let config = cli.tagger_config();

        assert_eq!(config.decoder.unseen_penalty, -42.5);
        assert!(config.decoder.terminator.is_none());
        assert!(config.estimator.final_token_emissions);
        assert_eq!(log_level(cli.verbose), Level::DEBUG);
        assert!(matches!(cli.command, Commands::Tag { input: None, json: true }));
    }

    #[test]
    fn test_custom_terminator() {
        let cli = parse(&["--terminator-word", "!", "--terminator-tag", "PUNCT", "interactive"]);
        assert_eq!(
            cli.tagger_config().decoder.terminator,
            Some(SentenceTerminator::new("!", "PUNCT"))
        );
    }

    #[test]
    fn test_evaluate_requires_test_files() {
        let result = Cli::try_parse_from([
            "sudi",
            "--train-tags",
            "tags.txt",
            "--train-sentences",
            "words.txt",
            "evaluate",
        ]);
        assert!(result.is_err());
    }
}
