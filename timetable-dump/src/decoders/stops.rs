//! Route block decoding: the stops a route calls at.

use serde::Serialize;
use tracing::trace;

use crate::domain::{NameTable, block_lines, split_columns, strip_trailing_delimiter};

/// Column widths of a stop line: stop id, street, city; the remainder holds
/// the schedule flag.
const STOP_WIDTHS: [usize; 3] = [7, 30, 20];

/// Remainder value marking a stop that has its own timetable.
const SCHEDULE_FLAG: &str = "r";

const STREET_DELIMITER: char = ',';

/// A stop as decoded from a route block, before linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStop<S> {
    pub stop: S,
    /// Set when a day-type set, a legend and hour blocks were emitted for
    /// this stop further down the dump.
    pub has_schedule: bool,
}

/// Decodes route blocks into stop lists.
///
/// Implementations may accumulate street names across the whole dump; they
/// are handed over once, when the session is linked.
pub trait RouteDecoder {
    type Stop;

    fn decode(&mut self, text: &str) -> Vec<RawStop<Self::Stop>>;

    /// Consumes the decoder and returns the street names it collected.
    fn into_streets(self) -> Vec<String>;
}

/// A stop decoded by [`StopListDecoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopInfo {
    pub id: String,
    /// Index into the dump's street list.
    pub street: usize,
    pub city: String,
}

/// Line-oriented route decoder: one stop per line.
///
/// Each line holds a 7-character stop id, a 30-character street name, a
/// 20-character city, and an optional trailing `r` for stops with a
/// timetable. Street names are deduplicated across the dump.
#[derive(Debug, Default)]
pub struct StopListDecoder {
    streets: NameTable,
}

impl StopListDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode_line(&mut self, line: &str) -> RawStop<StopInfo> {
        let cols = split_columns(line, &STOP_WIDTHS);
        let street = strip_trailing_delimiter(cols[1], STREET_DELIMITER);
        RawStop {
            stop: StopInfo {
                id: cols[0].to_string(),
                street: self.streets.intern(street),
                city: cols[2].to_string(),
            },
            has_schedule: cols[3] == SCHEDULE_FLAG,
        }
    }
}

impl RouteDecoder for StopListDecoder {
    type Stop = StopInfo;

    fn decode(&mut self, text: &str) -> Vec<RawStop<StopInfo>> {
        let stops: Vec<_> = block_lines(text).map(|line| self.decode_line(line)).collect();
        trace!(
            stops = stops.len(),
            scheduled = stops.iter().filter(|s| s.has_schedule).count(),
            "Decoded route block"
        );
        stops
    }

    fn into_streets(self) -> Vec<String> {
        self.streets.into_names()
    }
}
