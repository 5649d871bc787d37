//! Hour blocks: one dump line listing every departure within an hour.

use chrono::NaiveTime;
use serde::Serialize;

use super::fixed_width::{block_lines, leading_number};
use super::minute::Departure;

/// Number of leading whitespace-separated fields that carry route/line
/// scaffolding rather than schedule data.
const SCAFFOLD_FIELDS: usize = 2;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// All departures listed for one hour of one day type at one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBlock {
    /// Hour of the service day. Values of 24 and above are departures after
    /// midnight that still belong to the previous day's service. `None` when
    /// the field is missing or not a number.
    pub hour: Option<u32>,
    /// Departures in the order they appear on the line.
    pub minutes: Vec<Departure>,
}

/// A departure resolved to a wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDeparture {
    /// Days after the service day (1 for post-midnight hours).
    pub day_offset: u32,
    pub time: NaiveTime,
    pub low_floor: bool,
}

impl HourBlock {
    /// Decode one schedule line: two scaffolding fields, the hour, then one
    /// token per departure.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_dump::domain::HourBlock;
    ///
    /// let block = HourBlock::decode("  R1  MF  6 [07^x] 37");
    /// assert_eq!(block.hour, Some(6));
    /// assert_eq!(block.minutes.len(), 2);
    /// assert_eq!(block.minutes[1].minute(), Some(37));
    /// ```
    pub fn decode(line: &str) -> Self {
        let mut fields = line.split_whitespace().skip(SCAFFOLD_FIELDS);
        let hour = fields.next().and_then(leading_number);
        let minutes = fields.map(Departure::decode).collect();
        Self { hour, minutes }
    }

    /// Resolve every well-formed departure to a time of day.
    ///
    /// Hours of 24 and above (and minutes past 59) roll over onto the
    /// following day. Malformed cells are skipped, as is everything when the
    /// hour itself is unknown.
    pub fn departure_times(&self) -> Vec<ResolvedDeparture> {
        let Some(hour) = self.hour else {
            return Vec::new();
        };

        self.minutes
            .iter()
            .filter_map(|departure| {
                let minute = departure.minute()?;
                let total = hour.checked_mul(60)?.checked_add(minute)?;
                let within_day = total % MINUTES_PER_DAY;
                let time = NaiveTime::from_hms_opt(within_day / 60, within_day % 60, 0)?;
                Some(ResolvedDeparture {
                    day_offset: total / MINUTES_PER_DAY,
                    time,
                    low_floor: departure.is_low_floor(),
                })
            })
            .collect()
    }
}

/// Decode a schedule block: one [`HourBlock`] per non-blank line.
pub fn decode_schedule_block(text: &str) -> Vec<HourBlock> {
    block_lines(text).map(HourBlock::decode).collect()
}
