//! Readers for untagged sentences.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::corpus::tokenize;
use crate::error::{Result, SudiError};

/// Read one tokenized sentence per line.
///
/// Blank lines are kept as empty sentences so that callers can stay
/// line-aligned with the input.
pub fn read_sentences<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        sentences.push(tokenize(&line?));
    }
    Ok(sentences)
}

/// Read one tokenized sentence per line from a file.
pub fn read_sentences_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let read_error = |source| SudiError::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut sentences = Vec::new();
    for line in BufReader::new(file).lines() {
        sentences.push(tokenize(&line.map_err(read_error)?));
    }
    Ok(sentences)
}

/// Read every line of a file, attaching the path to any failure.
pub(crate) fn read_lines_from_path(path: &Path) -> Result<Vec<String>> {
    let read_error = |source| SudiError::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_error)
}
