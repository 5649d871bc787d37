//! Domain types for the schedule dump.
//!
//! This module holds the per-block decoders (departure cells, hour blocks,
//! day-type lines, fixed-width descriptors) and the types of the assembled
//! schedule tree. Decoding here is permissive: structurally odd input is
//! carried through as data rather than rejected.

mod day_type;
mod descriptor;
mod fixed_width;
mod hour;
mod minute;
mod name_table;
mod schedule;

pub use day_type::{
    DEFAULT_NO_SERVICE_MARKER, DayTypeCatalog, DayTypeEntry, DayTypeId, DayTypeLine,
    DayTypeSchedule, decode_day_type_set,
};
pub use descriptor::{
    Endpoint, RouteDescriptor, TransportLineHeader, decode_route_descriptors,
    decode_transport_lines,
};
pub use fixed_width::{block_lines, leading_number, split_columns, strip_trailing_delimiter};
pub use hour::{HourBlock, ResolvedDeparture, decode_schedule_block};
pub use minute::{Departure, MinuteCell};
pub use name_table::NameTable;
pub use schedule::{Route, ScheduleDump, Stop, StopSchedule, TextTables, TransportLine};
