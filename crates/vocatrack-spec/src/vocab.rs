//! Vocabulary entries and the `|`-separated word list format.
//!
//! The word list is a header row followed by one entry per line:
//!
//! ```text
//! word|meaning
//! cat|猫
//! dog|狗
//! ```
//!
//! Column order is taken from the header; extra columns are ignored. A field
//! may be quoted to hold the separator.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{SpecError, SpecResult};

/// Column separator used by word lists.
pub const SEPARATOR: u8 = b'|';

/// One vocabulary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word in the target language.
    pub word: String,
    /// Its meaning in the reference language.
    pub meaning: String,
}

impl WordEntry {
    /// Creates a word entry.
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

/// Parses a word list from text. Entries keep their file order.
///
/// Fields follow CSV quoting rules, so `"a|b"` is one field and `""` inside
/// quotes is a literal quote.
pub fn parse_vocabulary(text: &str) -> SpecResult<Vec<WordEntry>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .delimiter(SEPARATOR)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records().filter_map(|result| match result {
        Ok(record) if record.iter().all(str::is_empty) => None,
        Ok(record) => {
            let line = record.position().map_or(1, |p| line_at(text, p.byte()));
            Some(Ok((line, record)))
        }
        Err(err) => Some(Err(SpecError::Vocabulary {
            line: err.position().map_or(1, |p| line_at(text, p.byte())),
            message: err.to_string(),
        })),
    });

    let (header_line, header) = records.next().transpose()?.ok_or_else(|| {
        SpecError::Vocabulary {
            line: 1,
            message: "missing header row".to_string(),
        }
    })?;
    let column = |name: &str| {
        header
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SpecError::Vocabulary {
                line: header_line,
                message: format!("header has no '{}' column", name),
            })
    };
    let word_col = column("word")?;
    let meaning_col = column("meaning")?;
    let needed = word_col.max(meaning_col) + 1;

    let mut entries = Vec::new();
    for row in records {
        let (line, record) = row?;
        entries.push(entry(line, &record, word_col, meaning_col, needed)?);
    }

    Ok(entries)
}

fn entry(
    line: usize,
    record: &StringRecord,
    word_col: usize,
    meaning_col: usize,
    needed: usize,
) -> SpecResult<WordEntry> {
    if record.len() < needed {
        return Err(SpecError::Vocabulary {
            line,
            message: format!("expected at least {} fields, found {}", needed, record.len()),
        });
    }
    let word = &record[word_col];
    if word.is_empty() {
        return Err(SpecError::Vocabulary {
            line,
            message: "word is empty".to_string(),
        });
    }
    Ok(WordEntry::new(word, &record[meaning_col]))
}

/// 1-based line of the first non-blank byte at or after `byte`.
fn line_at(text: &str, byte: u64) -> usize {
    let bytes = text.as_bytes();
    let start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    let skipped = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    1 + bytes[..start + skipped].iter().filter(|&&b| b == b'\n').count()
}

/// Reads and parses a word list file.
pub fn load_vocabulary(path: &Path) -> SpecResult<Vec<WordEntry>> {
    let text = fs::read_to_string(path).map_err(|source| SpecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_vocabulary(&text)
}
