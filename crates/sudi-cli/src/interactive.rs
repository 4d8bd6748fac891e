//! Console read-print loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use sudi_core::Tagger;
use tracing::warn;

const PROMPT: &str = "type a sentence or 'q' to quit";
const QUIT: &str = "q";

/// Prompt for sentences until `q` or end of input, printing their tags.
pub fn run<R: BufRead, W: Write>(tagger: &Tagger, mut input: R, mut output: W) -> Result<()> {
    let mut line = String::new();

    loop {
        writeln!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let sentence = line.trim();
        if sentence == QUIT {
            break;
        }
        if sentence.is_empty() {
            writeln!(output, "not valid input")?;
            continue;
        }

        match tagger.tag(sentence) {
            Ok(tags) => writeln!(output, "{}", tags.join(" "))?,
            Err(err) => {
                warn!(error = %err, "could not tag sentence");
                writeln!(output, "error: {err}")?;
            }
        }
    }

    Ok(())
}
