//! Legend block decoding: footnote explanations and free texts per stop.

use serde::Serialize;
use tracing::trace;

use crate::domain::{NameTable, TextTables, block_lines};

const BEGIN_DATE_PREFIX: char = '@';
const COMMENT_PREFIX: char = '#';
const LEGEND_SEPARATOR: &str = " - ";

/// Decodes legend blocks.
///
/// The three text tables accumulate over the whole dump and are handed over
/// once, when the session is linked.
pub trait LegendDecoder {
    type Legend;

    fn decode(&mut self, text: &str) -> Self::Legend;

    /// Consumes the decoder and returns the texts it collected.
    fn into_texts(self) -> TextTables;
}

/// Explanation of one footnote marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub marker: char,
    /// Index into [`TextTables::legend_texts`].
    pub text: usize,
}

/// The legend of one scheduled stop, referencing the dump-wide text tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Indices into [`TextTables::begin_date_texts`].
    pub begin_dates: Vec<usize>,
    /// Indices into [`TextTables::comment_texts`].
    pub comments: Vec<usize>,
    pub entries: Vec<LegendEntry>,
}

/// Line-oriented legend decoder.
///
/// `@ text` lines are begin-date texts, `# text` lines are comments, and
/// `x - text` lines explain footnote marker `x`. Any other line is kept as a
/// comment.
#[derive(Debug, Default)]
pub struct LegendListDecoder {
    begin_dates: NameTable,
    comments: NameTable,
    legends: NameTable,
}

impl LegendListDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode_line(&mut self, line: &str, legend: &mut Legend) {
        let line = line.trim();

        if let Some(text) = line.strip_prefix(BEGIN_DATE_PREFIX) {
            legend.begin_dates.push(self.begin_dates.intern(text.trim()));
            return;
        }
        if let Some(text) = line.strip_prefix(COMMENT_PREFIX) {
            legend.comments.push(self.comments.intern(text.trim()));
            return;
        }

        match line.split_once(LEGEND_SEPARATOR) {
            Some((marker, text)) if marker.trim().chars().count() == 1 => {
                let marker = marker.trim().chars().next().unwrap_or_default();
                legend.entries.push(LegendEntry {
                    marker,
                    text: self.legends.intern(text.trim()),
                });
            }
            _ => {
                trace!(line, "Unrecognised legend line, keeping as comment");
                legend.comments.push(self.comments.intern(line));
            }
        }
    }
}

impl LegendDecoder for LegendListDecoder {
    type Legend = Legend;

    fn decode(&mut self, text: &str) -> Legend {
        let mut legend = Legend::default();
        for line in block_lines(text) {
            self.decode_line(line, &mut legend);
        }
        legend
    }

    fn into_texts(self) -> TextTables {
        TextTables {
            begin_date_texts: self.begin_dates.into_names(),
            comment_texts: self.comments.into_names(),
            legend_texts: self.legends.into_names(),
        }
    }
}
