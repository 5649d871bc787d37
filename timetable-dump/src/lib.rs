//! Schedule dump parser.
//!
//! Turns the flat, positionally delimited blocks of a transit schedule
//! export (transport lines, routes, stops, day types, hourly departures)
//! back into the nested schedule tree their order implies.

pub mod decoders;
pub mod domain;
pub mod script;
pub mod session;
