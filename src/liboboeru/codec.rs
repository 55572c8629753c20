//! The `term:definition[:hardness]` deck file format.
//!
//! Import accepts two or three `:`-separated fields per line. Export writes
//! only `term:definition`, so hardness does not survive a round trip.

use crate::liboboeru::deck::{Card, Deck, Upserted};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

pub const SEPARATOR: char = ':';

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: expected 2 or 3 fields separated by ':', found {fields}.")]
    Malformed { line: usize, fields: usize },
    #[error("Line {line}: \"{value}\" is not a valid hardness.")]
    BadHardness { line: usize, value: String },
}

impl CodecError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodecError::Io(err) if err.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
}

impl ImportSummary {
    /// Records processed, counting updates as well as additions.
    pub fn processed(&self) -> usize {
        self.added + self.updated
    }
}

/// Parses one line. `line_num` is 1-based and only used for error messages.
pub fn parse_line(line: &str, line_num: usize) -> Result<Card, CodecError> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    match fields.as_slice() {
        [term, definition] => Ok(Card::new(*term, *definition)),
        [term, definition, hardness] => match hardness.parse::<u32>() {
            Ok(hardness) => Ok(Card::new(*term, *definition).with_hardness(hardness)),
            Err(_) => Err(CodecError::BadHardness {
                line: line_num,
                value: hardness.to_string(),
            }),
        },
        _ => Err(CodecError::Malformed {
            line: line_num,
            fields: fields.len(),
        }),
    }
}

/// Parses every line of `reader`. Blank lines are skipped.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<Card>, CodecError> {
    let mut cards = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            continue;
        }
        cards.push(parse_line(line, idx + 1)?);
    }
    Ok(cards)
}

/// Reads all records before touching `deck`, so a bad line leaves it as it was.
pub fn import_from<R: BufRead>(deck: &mut Deck, reader: R) -> Result<ImportSummary, CodecError> {
    let cards = parse(reader)?;
    let mut summary = ImportSummary::default();
    for card in cards {
        match deck.upsert(card) {
            Upserted::Added => summary.added += 1,
            Upserted::Updated => summary.updated += 1,
        }
    }
    debug!("[Import] {:?}", summary);
    Ok(summary)
}

pub fn import_file(deck: &mut Deck, path: &Path) -> Result<ImportSummary, CodecError> {
    let now = Instant::now();
    let file = File::open(path)?;
    let summary = import_from(deck, BufReader::new(file))?;
    info!(
        "[Import] Loaded {} records from {:?} in {} ms.",
        summary.processed(),
        path,
        now.elapsed().as_millis()
    );
    Ok(summary)
}

pub fn export_to<W: Write>(deck: &Deck, mut writer: W) -> io::Result<usize> {
    for card in deck {
        writeln!(writer, "{}{}{}", card.term, SEPARATOR, card.definition)?;
    }
    writer.flush()?;
    Ok(deck.len())
}

pub fn export_file(deck: &Deck, path: &Path) -> io::Result<usize> {
    let now = Instant::now();
    let file = File::create(path)?;
    let count = export_to(deck, BufWriter::new(file))?;
    info!(
        "[Export] Saved {} cards to {:?} in {} ms.",
        count,
        path,
        now.elapsed().as_millis()
    );
    Ok(count)
}
