//! Minute-cell codec.
//!
//! Each departure inside an hour block is written as one compact token: an
//! optional `[` marking a low-floor vehicle, the minute digits, then any
//! footnote markers. `^` and `]` are structural punctuation and never
//! footnote markers themselves.
//!
//! `[07^x]` is a low-floor departure at minute 7 with footnote `x`;
//! `42` is a plain departure at minute 42.

use serde::Serialize;

const LOW_FLOOR_MARK: char = '[';
const CLOSE_MARK: char = ']';
const FOOTNOTE_MARK: char = '^';

/// A successfully decoded departure cell.
///
/// The minute is not range-checked: the dump occasionally carries values
/// past 59 and they are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteCell {
    pub low_floor: bool,
    pub minute: u32,
    /// Footnote markers in token order. Never `Some` of an empty list.
    #[serde(rename = "footnoteMarkers", skip_serializing_if = "Option::is_none")]
    pub footnotes: Option<Vec<char>>,
}

impl MinuteCell {
    /// Render the cell back into the token format.
    ///
    /// Low-floor cells use the bracketed form (`[07^x]`), others the bare
    /// form (`07x`). Minutes are zero-padded to two digits.
    pub fn encode(&self) -> String {
        let markers: String = self.footnotes.iter().flatten().collect();
        if self.low_floor {
            if markers.is_empty() {
                format!("{LOW_FLOOR_MARK}{:02}{CLOSE_MARK}", self.minute)
            } else {
                format!(
                    "{LOW_FLOOR_MARK}{:02}{FOOTNOTE_MARK}{markers}{CLOSE_MARK}",
                    self.minute
                )
            }
        } else {
            format!("{:02}{markers}", self.minute)
        }
    }
}

/// Best-effort decode of one departure token.
///
/// Decoding never fails; a token without a minute still reports whatever
/// else could be read from it so callers can tell a broken cell apart from a
/// departure at minute zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Departure {
    Scheduled(MinuteCell),
    #[serde(rename_all = "camelCase")]
    Malformed {
        raw: String,
        low_floor: bool,
        #[serde(rename = "footnoteMarkers", skip_serializing_if = "Option::is_none")]
        footnotes: Option<Vec<char>>,
    },
}

impl Departure {
    /// Decode a single token such as `[12^x]` or `07a`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_dump::domain::{Departure, MinuteCell};
    ///
    /// let cell = Departure::decode("[07^x]");
    /// assert_eq!(
    ///     cell,
    ///     Departure::Scheduled(MinuteCell {
    ///         low_floor: true,
    ///         minute: 7,
    ///         footnotes: Some(vec!['x']),
    ///     })
    /// );
    ///
    /// assert!(Departure::decode("[x]").is_malformed());
    /// ```
    pub fn decode(token: &str) -> Self {
        let (low_floor, body) = match token.strip_prefix(LOW_FLOOR_MARK) {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let digits_end = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        let (digits, tail) = body.split_at(digits_end);
        let footnotes = footnote_markers(tail);

        match digits.parse::<u32>() {
            Ok(minute) => Departure::Scheduled(MinuteCell {
                low_floor,
                minute,
                footnotes,
            }),
            Err(_) => Departure::Malformed {
                raw: token.to_string(),
                low_floor,
                footnotes,
            },
        }
    }

    /// The minute, if the cell decoded cleanly.
    pub fn minute(&self) -> Option<u32> {
        match self {
            Departure::Scheduled(cell) => Some(cell.minute),
            Departure::Malformed { .. } => None,
        }
    }

    pub fn is_low_floor(&self) -> bool {
        match self {
            Departure::Scheduled(cell) => cell.low_floor,
            Departure::Malformed { low_floor, .. } => *low_floor,
        }
    }

    pub fn footnotes(&self) -> Option<&[char]> {
        match self {
            Departure::Scheduled(cell) => cell.footnotes.as_deref(),
            Departure::Malformed { footnotes, .. } => footnotes.as_deref(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Departure::Malformed { .. })
    }

    /// Render back into token form. Malformed cells reproduce their raw text.
    pub fn encode(&self) -> String {
        match self {
            Departure::Scheduled(cell) => cell.encode(),
            Departure::Malformed { raw, .. } => raw.clone(),
        }
    }
}

fn footnote_markers(tail: &str) -> Option<Vec<char>> {
    let markers: Vec<char> = tail
        .chars()
        .filter(|&c| c != CLOSE_MARK && c != FOOTNOTE_MARK)
        .collect();
    (!markers.is_empty()).then_some(markers)
}
