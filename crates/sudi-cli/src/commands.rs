//! Batch subcommands: evaluation against a reference and line-by-line tagging.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sudi_core::{tokenize, Accuracy, SudiError, TaggedCorpus, Tagger};
use tracing::warn;

/// One tagged line in `--json` mode.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagOutput {
    pub input: String,
    pub tags: Option<Vec<String>>,
    pub log_score: Option<f64>,
    pub error: Option<String>,
}

/// Tag a reference set and print the accuracy report.
pub fn evaluate(
    tagger: &Tagger,
    test_sentences: &Path,
    test_tags: &Path,
    json: bool,
    truncate: bool,
) -> Result<()> {
    let reference = TaggedCorpus::from_paths(test_tags, test_sentences)
        .context("Failed to load the reference set")?;
    let accuracy = tagger.evaluate(&reference)?;

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &accuracy, json, truncate)
}

fn write_report<W: Write>(
    out: &mut W,
    accuracy: &Accuracy,
    json: bool,
    truncate: bool,
) -> Result<()> {
    if json {
        let report = serde_json::json!({
            "correct": accuracy.correct,
            "incorrect": accuracy.incorrect,
            "total": accuracy.total(),
            "percent": if truncate {
                serde_json::json!(accuracy.truncated_percent())
            } else {
                serde_json::json!(accuracy.percent())
            },
        });
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else if truncate {
        writeln!(
            out,
            "incorrect: {} correct: {}",
            accuracy.incorrect, accuracy.correct
        )?;
        writeln!(out, "percent accuracy: {}%", accuracy.truncated_percent())?;
    } else {
        writeln!(out, "{accuracy}")?;
    }
    Ok(())
}

/// Tag every line of `input` (stdin when `None`).
pub fn tag(tagger: &Tagger, input: Option<&Path>, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            tag_lines(tagger, BufReader::new(file), &mut out, json)
        }
        None => tag_lines(tagger, io::stdin().lock(), &mut out, json),
    }
}

/// Tag line by line, keeping output aligned with input.
///
/// Blank input lines produce blank output lines. A sentence that cannot be
/// tagged is reported and tagging continues.
pub fn tag_lines<R: BufRead, W: Write>(
    tagger: &Tagger,
    reader: R,
    out: &mut W,
    json: bool,
) -> Result<()> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let words = tokenize(&line);

        let result = if words.is_empty() {
            Err(SudiError::EmptyInput)
        } else {
            tagger.tag_scored(&words)
        };
        if let Err(err) = &result {
            if !words.is_empty() {
                warn!(line = idx + 1, error = %err, "could not tag sentence");
            }
        }

        if json {
            let output = match result {
                Ok(path) => TagOutput {
                    input: line,
                    tags: Some(path.tags),
                    log_score: Some(path.log_score),
                    error: None,
                },
                Err(err) => TagOutput {
                    input: line,
                    tags: None,
                    log_score: None,
                    error: Some(err.to_string()),
                },
            };
            writeln!(out, "{}", serde_json::to_string(&output)?)?;
        } else {
            match result {
                Ok(path) => writeln!(out, "{}", path.tags.join(" "))?,
                Err(_) => writeln!(out)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}
