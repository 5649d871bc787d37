//! The assembled schedule tree.
//!
//! Stop and legend payloads come from the pluggable decoders, so the tree is
//! generic over them. The defaults are the decoders shipped with this crate.

use serde::Serialize;

use super::day_type::DayTypeSchedule;
use super::descriptor::{Endpoint, RouteDescriptor};
use crate::decoders::{Legend, StopInfo};

/// Everything parsed from one dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDump<S = StopInfo, G = Legend> {
    /// Distinct transport-line type names, indexed by
    /// [`TransportLine::type_index`].
    pub line_type_names: Vec<String>,
    /// Street names as collected by the route decoder.
    pub streets: Vec<String>,
    pub texts: TextTables,
    pub schedule: Vec<TransportLine<S, G>>,
}

/// Free texts accumulated by the legend decoder over a whole dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTables {
    pub begin_date_texts: Vec<String>,
    pub comment_texts: Vec<String>,
    pub legend_texts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportLine<S = StopInfo, G = Legend> {
    pub id: String,
    pub type_index: usize,
    pub routes: Vec<Route<S, G>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route<S = StopInfo, G = Legend> {
    pub code: String,
    pub direction: String,
    pub level: String,
    pub begin: Endpoint,
    pub end: Endpoint,
    pub stops: Vec<Stop<S, G>>,
}

impl<S, G> Route<S, G> {
    pub fn new(descriptor: RouteDescriptor, stops: Vec<Stop<S, G>>) -> Self {
        let RouteDescriptor {
            code,
            direction,
            level,
            begin,
            end,
        } = descriptor;
        Self {
            code,
            direction,
            level,
            begin,
            end,
            stops,
        }
    }
}

/// A stop on a route. Only stops flagged by the route decoder carry a
/// schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop<S = StopInfo, G = Legend> {
    #[serde(flatten)]
    pub info: S,
    #[serde(flatten)]
    pub schedule: Option<StopSchedule<G>>,
}

impl<S, G> Stop<S, G> {
    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSchedule<G = Legend> {
    pub schedules_by_days: Vec<DayTypeSchedule>,
    pub legend: G,
}
