//! Fixed-width route descriptors and transport-line headers.

use serde::Serialize;

use super::fixed_width::{block_lines, split_columns, strip_trailing_delimiter};

/// Column widths of a route descriptor line; the remainder is the level.
const ROUTE_DESCRIPTOR_WIDTHS: [usize; 10] = [17, 8, 30, 6, 5, 30, 6, 10, 2, 7];

/// Column widths of a transport-line header; the remainder is the type name.
const TRANSPORT_LINE_WIDTHS: [usize; 3] = [10, 4, 2];

/// Trailing punctuation the dump leaves on endpoint names.
const ENDPOINT_DELIMITER: char = ',';

/// One end of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub city: String,
}

impl Endpoint {
    fn from_columns(name: &str, city: &str) -> Self {
        Self {
            name: strip_trailing_delimiter(name, ENDPOINT_DELIMITER).to_string(),
            city: city.to_string(),
        }
    }
}

/// Header information for one route of a transport line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub code: String,
    pub direction: String,
    pub level: String,
    pub begin: Endpoint,
    pub end: Endpoint,
}

impl RouteDescriptor {
    /// Decode one fixed-width descriptor line.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_dump::domain::RouteDescriptor;
    ///
    /// let line = format!(
    ///     "{:<17}{:<8}{:<30}{:<6}{:<5}{:<30}{:<6}{:<10}{:<2}{:<7}{}",
    ///     "TP-MLO", "", "Dworzec Centralny,", "WA", "", "Młociny,", "WA", "", "A", "", "1"
    /// );
    /// let desc = RouteDescriptor::decode(&line);
    /// assert_eq!(desc.code, "TP-MLO");
    /// assert_eq!(desc.begin.name, "Dworzec Centralny");
    /// assert_eq!(desc.end.name, "Młociny");
    /// assert_eq!(desc.direction, "A");
    /// assert_eq!(desc.level, "1");
    /// ```
    pub fn decode(line: &str) -> Self {
        let cols = split_columns(line, &ROUTE_DESCRIPTOR_WIDTHS);
        Self {
            code: cols[0].to_string(),
            begin: Endpoint::from_columns(cols[2], cols[3]),
            end: Endpoint::from_columns(cols[5], cols[6]),
            direction: cols[8].to_string(),
            level: cols[10].to_string(),
        }
    }
}

/// Decode a descriptor block: every route of one transport line.
pub fn decode_route_descriptors(text: &str) -> Vec<RouteDescriptor> {
    block_lines(text).map(RouteDescriptor::decode).collect()
}

/// Identity and type of one transport line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportLineHeader {
    pub id: String,
    pub type_name: String,
}

impl TransportLineHeader {
    pub fn decode(line: &str) -> Self {
        let cols = split_columns(line, &TRANSPORT_LINE_WIDTHS);
        Self {
            id: cols[1].to_string(),
            type_name: cols[3].to_string(),
        }
    }
}

/// Decode the transport-line block: one header per non-blank line.
pub fn decode_transport_lines(text: &str) -> Vec<TransportLineHeader> {
    block_lines(text).map(TransportLineHeader::decode).collect()
}
