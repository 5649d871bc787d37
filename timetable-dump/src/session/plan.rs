//! Explicit link plans.
//!
//! A plan spells out which ingested block goes where in the tree, instead
//! of relying on the order the blocks were ingested in. Every handle in the
//! plan must be used exactly once, and each level of the plan must have as
//! many children as the blocks it points at call for.

use crate::decoders::RawStop;
use crate::domain::{DayTypeLine, HourBlock, RouteDescriptor, StopSchedule};

use super::error::{BlockKind, LinkError};
use super::link::{LineSource, RouteSource, StopSource, Stores, day_schedules};
use super::store::Handle;

/// Every route of one transport line.
pub type RouteDescriptors = Vec<RouteDescriptor>;
/// Every stop of one route.
pub type StopList<S> = Vec<RawStop<S>>;
/// The day types of one scheduled stop.
pub type DayTypeSet = Vec<DayTypeLine>;
/// The hour blocks of one scheduled stop for one day type.
pub type HourBlocks = Vec<HourBlock>;

/// How to assemble a whole dump.
#[derive(Debug)]
pub struct LinkPlan<S, G> {
    pub lines: Vec<LinePlan<S, G>>,
}

impl<S, G> LinkPlan<S, G> {
    pub fn new(lines: Vec<LinePlan<S, G>>) -> Self {
        Self { lines }
    }
}

/// One transport line: its header text and the blocks under it.
#[derive(Debug)]
pub struct LinePlan<S, G> {
    /// The line's row from the transport-line block.
    pub line: String,
    pub descriptors: Handle<RouteDescriptors>,
    /// One entry per route descriptor, in descriptor order.
    pub routes: Vec<RoutePlan<S, G>>,
}

/// One route: its stop list and, for every scheduled stop in order, the
/// blocks attached to it.
#[derive(Debug)]
pub struct RoutePlan<S, G> {
    pub stops: Handle<StopList<S>>,
    pub scheduled_stops: Vec<StopPlan<G>>,
}

/// One scheduled stop.
#[derive(Debug)]
pub struct StopPlan<G> {
    pub day_types: Handle<DayTypeSet>,
    pub legend: Handle<G>,
    /// One entry per day type with service, in day-type order.
    pub departures: Vec<Handle<HourBlocks>>,
}

fn shape_mismatch(store: BlockKind, expected: usize, planned: usize) -> LinkError {
    LinkError::PlanShapeMismatch {
        store,
        expected,
        planned,
    }
}

impl<S, G> LineSource<S, G> for LinePlan<S, G> {
    type Route = RoutePlan<S, G>;

    fn routes(
        self,
        stores: &mut Stores<S, G>,
    ) -> Result<Vec<(RouteDescriptor, Self::Route)>, LinkError> {
        let descriptors = stores.descriptors.take(self.descriptors)?;
        if descriptors.len() != self.routes.len() {
            return Err(shape_mismatch(
                BlockKind::Routes,
                descriptors.len(),
                self.routes.len(),
            ));
        }
        Ok(descriptors.into_iter().zip(self.routes).collect())
    }
}

impl<S, G> RouteSource<S, G> for RoutePlan<S, G> {
    type Stop = StopPlan<G>;

    fn stops(
        self,
        stores: &mut Stores<S, G>,
    ) -> Result<Vec<(RawStop<S>, Option<Self::Stop>)>, LinkError> {
        let raw_stops = stores.routes.take(self.stops)?;
        let scheduled = raw_stops.iter().filter(|raw| raw.has_schedule).count();
        if scheduled != self.scheduled_stops.len() {
            return Err(shape_mismatch(
                BlockKind::DayTypeSets,
                scheduled,
                self.scheduled_stops.len(),
            ));
        }

        let mut planned = self.scheduled_stops.into_iter();
        Ok(raw_stops
            .into_iter()
            .map(|raw| {
                let stop = if raw.has_schedule { planned.next() } else { None };
                (raw, stop)
            })
            .collect())
    }
}

impl<S, G> StopSource<S, G> for StopPlan<G> {
    fn schedule(self, stores: &mut Stores<S, G>) -> Result<StopSchedule<G>, LinkError> {
        let day_types = stores.day_types.take(self.day_types)?;
        let serviced = day_types.iter().filter(|day| !day.no_service).count();
        let planned = self.departures.len();
        if serviced != planned {
            return Err(shape_mismatch(BlockKind::HourBlocks, serviced, planned));
        }

        let mut departures = self.departures.into_iter();
        let schedules_by_days = day_schedules(day_types, || {
            let handle = departures
                .next()
                .ok_or_else(|| shape_mismatch(BlockKind::HourBlocks, serviced, planned))?;
            stores.hours.take(handle)
        })?;
        let legend = stores.legends.take(self.legend)?;

        Ok(StopSchedule {
            schedules_by_days,
            legend,
        })
    }
}
