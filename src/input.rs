//! Reads an instance: one line of large-disk labels, then one line of
//! small-disk labels with a single 0 for the blank.

use std::io::BufRead;

use crate::error::{PuzzleError, Result};
use crate::puzzle::Ring;

pub fn read_instance<R: BufRead>(reader: R, size: usize) -> Result<Ring> {
    let mut lines = reader.lines();
    let mut next_line = |which: &str| -> Result<String> {
        match lines.next() {
            Some(Ok(line)) => Ok(line),
            Some(Err(err)) => Err(PuzzleError::Parse(format!("reading {which} disks: {err}"))),
            None => Err(PuzzleError::Parse(format!(
                "expected two lines of input, missing the {which} disks"
            ))),
        }
    };

    let large = parse_line(&next_line("large")?, size)?;
    let small = parse_line(&next_line("small")?, size)?;

    Ring::new(large, small)
}

pub fn parse_line(line: &str, size: usize) -> Result<Vec<u32>> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| PuzzleError::Parse(format!("{token:?} is not a disk label")))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.len() != size {
        return Err(PuzzleError::Parse(format!(
            "expected {size} integers per line, got {}",
            values.len()
        )));
    }
    Ok(values)
}
