//! Day-type calendar: the catalog of day types and per-stop day-type sets.

use std::collections::HashMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use super::fixed_width::block_lines;
use super::hour::HourBlock;

/// Marker the dump places on a day-type line when there is no service.
pub const DEFAULT_NO_SERVICE_MARKER: &str = "<< NIE KURSUJE >>";

/// Number of leading characters of a day-type line holding its code.
const CODE_LEN: usize = 2;

/// Index of a day type in the [`DayTypeCatalog`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DayTypeId(pub usize);

impl fmt::Debug for DayTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayTypeId({})", self.0)
    }
}

/// One entry of the day-type list used to seed the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTypeEntry {
    pub code: String,
}

impl DayTypeEntry {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Mapping from two-character day-type codes to stable indices.
///
/// Loaded once before parsing and read-only afterwards, so a single catalog
/// can be shared between sessions behind an `Arc`.
///
/// # Examples
///
/// ```
/// use timetable_dump::domain::{DayTypeCatalog, DayTypeEntry, DayTypeId};
///
/// let catalog = DayTypeCatalog::from_entries(&[DayTypeEntry::new("MF"), DayTypeEntry::new("SA")]);
/// assert_eq!(catalog.lookup("SA"), Some(DayTypeId(1)));
/// assert_eq!(catalog.lookup("SU"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DayTypeCatalog {
    codes: HashMap<String, DayTypeId>,
    entries: usize,
}

impl DayTypeCatalog {
    /// Assign each entry its 0-based position. A code listed twice keeps the
    /// later position.
    pub fn from_entries(entries: &[DayTypeEntry]) -> Self {
        Self::from_codes(entries.iter().map(|entry| entry.code.as_str()))
    }

    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = HashMap::new();
        let mut entries = 0;
        for (idx, code) in codes.into_iter().enumerate() {
            if map.insert(code.to_string(), DayTypeId(idx)).is_some() {
                debug!(code, index = idx, "Day-type code listed twice, keeping later index");
            }
            entries = idx + 1;
        }
        debug!(entries, distinct = map.len(), "Loaded day-type catalog");
        Self {
            codes: map,
            entries,
        }
    }

    pub fn lookup(&self, code: &str) -> Option<DayTypeId> {
        self.codes.get(code).copied()
    }

    /// Number of entries the catalog was loaded from.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

/// One decoded line of a stop's day-type set, before departures are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTypeLine {
    /// `None` when the code is not in the catalog.
    pub day_type: Option<DayTypeId>,
    pub no_service: bool,
}

impl DayTypeLine {
    pub fn decode(line: &str, catalog: &DayTypeCatalog, no_service_marker: &str) -> Self {
        let line = line.trim();
        let code_end = line
            .char_indices()
            .nth(CODE_LEN)
            .map_or(line.len(), |(idx, _)| idx);
        Self {
            day_type: catalog.lookup(&line[..code_end]),
            no_service: line.contains(no_service_marker),
        }
    }
}

/// Decode a day-type-set block: one [`DayTypeLine`] per non-blank line.
pub fn decode_day_type_set(
    text: &str,
    catalog: &DayTypeCatalog,
    no_service_marker: &str,
) -> Vec<DayTypeLine> {
    block_lines(text)
        .map(|line| DayTypeLine::decode(line, catalog, no_service_marker))
        .collect()
}

/// The schedule of one stop for one day type.
///
/// Either the day type has no service, or it has its hour blocks; the two
/// never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTypeSchedule {
    day_type: Option<DayTypeId>,
    departures: Option<Vec<HourBlock>>,
}

impl DayTypeSchedule {
    pub fn no_service(day_type: Option<DayTypeId>) -> Self {
        Self {
            day_type,
            departures: None,
        }
    }

    pub fn with_departures(day_type: Option<DayTypeId>, departures: Vec<HourBlock>) -> Self {
        Self {
            day_type,
            departures: Some(departures),
        }
    }

    pub fn day_type(&self) -> Option<DayTypeId> {
        self.day_type
    }

    pub fn is_no_service(&self) -> bool {
        self.departures.is_none()
    }

    pub fn departures(&self) -> Option<&[HourBlock]> {
        self.departures.as_deref()
    }
}

impl Serialize for DayTypeSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DayTypeSchedule", 2)?;
        match self.day_type {
            Some(day_type) => state.serialize_field("dayTypeRef", &day_type)?,
            None => state.skip_field("dayTypeRef")?,
        }
        match &self.departures {
            Some(departures) => state.serialize_field("departuresPerHour", departures)?,
            None => state.serialize_field("noService", &true)?,
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> DayTypeCatalog {
        DayTypeCatalog::from_codes(["MF", "SA", "SU"])
    }

    #[test]
    fn catalog_assigns_insertion_indices() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("MF"), Some(DayTypeId(0)));
        assert_eq!(catalog.lookup("SA"), Some(DayTypeId(1)));
        assert_eq!(catalog.lookup("SU"), Some(DayTypeId(2)));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn catalog_repeated_code_keeps_later_index() {
        let catalog = DayTypeCatalog::from_codes(["MF", "SA", "MF"]);
        assert_eq!(catalog.lookup("MF"), Some(DayTypeId(2)));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn catalog_from_entries() {
        let entries = vec![DayTypeEntry::new("DP"), DayTypeEntry::new("SB")];
        let catalog = DayTypeCatalog::from_entries(&entries);
        assert_eq!(catalog.lookup("SB"), Some(DayTypeId(1)));
    }

    #[test]
    fn empty_catalog() {
        let catalog = DayTypeCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.lookup("MF"), None);
    }

    #[test]
    fn day_type_line_with_service() {
        let line = DayTypeLine::decode("   MF  ", &catalog(), DEFAULT_NO_SERVICE_MARKER);
        assert_eq!(
            line,
            DayTypeLine {
                day_type: Some(DayTypeId(0)),
                no_service: false
            }
        );
    }

    #[test]
    fn day_type_line_without_service() {
        let line = DayTypeLine::decode(
            "SA << NIE KURSUJE >>",
            &catalog(),
            DEFAULT_NO_SERVICE_MARKER,
        );
        assert_eq!(line.day_type, Some(DayTypeId(1)));
        assert!(line.no_service);
    }

    #[test]
    fn unknown_code_is_none() {
        let line = DayTypeLine::decode("XX", &catalog(), DEFAULT_NO_SERVICE_MARKER);
        assert_eq!(line.day_type, None);
        assert!(!line.no_service);
    }

    #[test]
    fn short_line_uses_whole_text_as_code() {
        let catalog = DayTypeCatalog::from_codes(["M"]);
        let line = DayTypeLine::decode("M", &catalog, DEFAULT_NO_SERVICE_MARKER);
        assert_eq!(line.day_type, Some(DayTypeId(0)));
    }

    #[test]
    fn custom_marker() {
        let line = DayTypeLine::decode("SU -- none --", &catalog(), "-- none --");
        assert!(line.no_service);
    }

    #[test]
    fn set_block_decodes_each_line() {
        let set = decode_day_type_set(
            "MF \nSA << NIE KURSUJE >>\n\n",
            &catalog(),
            DEFAULT_NO_SERVICE_MARKER,
        );
        assert_eq!(set.len(), 2);
        assert!(!set[0].no_service);
        assert!(set[1].no_service);
    }

    #[test]
    fn schedule_invariant() {
        let none = DayTypeSchedule::no_service(Some(DayTypeId(1)));
        assert!(none.is_no_service());
        assert_eq!(none.departures(), None);

        let some = DayTypeSchedule::with_departures(None, vec![]);
        assert!(!some.is_no_service());
        assert_eq!(some.departures(), Some(&[][..]));
        assert_eq!(some.day_type(), None);
    }

    #[test]
    fn schedule_serialization_shapes() {
        let none = DayTypeSchedule::no_service(Some(DayTypeId(1)));
        assert_eq!(
            serde_json::to_value(&none).unwrap(),
            serde_json::json!({"dayTypeRef": 1, "noService": true})
        );

        let some = DayTypeSchedule::with_departures(None, vec![]);
        assert_eq!(
            serde_json::to_value(&some).unwrap(),
            serde_json::json!({"departuresPerHour": []})
        );
    }

    #[test]
    fn unknown_day_type_leaves_out_reference() {
        let schedule = DayTypeSchedule::no_service(None);
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json, serde_json::json!({"noService": true}));
        assert!(json.get("dayTypeRef").is_none());
    }
}
