//! Tree assembly from stored blocks.
//!
//! The traversal is the same whether blocks are addressed by ingestion order
//! or by an explicit plan. Each level of the tree asks its source for the
//! blocks under it: [`InOrder`] pops the stores, a plan takes its handles.

use tracing::{debug, trace};

use crate::decoders::RawStop;
use crate::domain::{
    DayTypeSchedule, NameTable, Route, RouteDescriptor, Stop, StopSchedule,
    TransportLineHeader, TransportLine,
};

use super::error::{BlockKind, LinkError};
use super::plan::{DayTypeSet, HourBlocks, RouteDescriptors, StopList};
use super::store::{BlockStore, SessionId};

/// The five block stores of a session.
#[derive(Debug)]
pub(crate) struct Stores<S, G> {
    pub(crate) descriptors: BlockStore<RouteDescriptors>,
    pub(crate) routes: BlockStore<StopList<S>>,
    pub(crate) day_types: BlockStore<DayTypeSet>,
    pub(crate) hours: BlockStore<HourBlocks>,
    pub(crate) legends: BlockStore<G>,
}

impl<S, G> Stores<S, G> {
    pub(crate) fn new(session: SessionId) -> Self {
        Self {
            descriptors: BlockStore::new(session, BlockKind::RouteDescriptors),
            routes: BlockStore::new(session, BlockKind::Routes),
            day_types: BlockStore::new(session, BlockKind::DayTypeSets),
            hours: BlockStore::new(session, BlockKind::HourBlocks),
            legends: BlockStore::new(session, BlockKind::Legends),
        }
    }

    pub(crate) fn remaining(&self, kind: BlockKind) -> usize {
        match kind {
            BlockKind::RouteDescriptors => self.descriptors.remaining(),
            BlockKind::Routes => self.routes.remaining(),
            BlockKind::DayTypeSets => self.day_types.remaining(),
            BlockKind::HourBlocks => self.hours.remaining(),
            BlockKind::Legends => self.legends.remaining(),
        }
    }

    /// Stores that still hold blocks, with their counts.
    pub(crate) fn leftovers(&self) -> Vec<(BlockKind, usize)> {
        BlockKind::ALL
            .into_iter()
            .map(|kind| (kind, self.remaining(kind)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}

/// Supplies the blocks under one transport line.
pub(crate) trait LineSource<S, G> {
    type Route: RouteSource<S, G>;

    /// The line's route descriptors, each with the source of its route's blocks.
    fn routes(
        self,
        stores: &mut Stores<S, G>,
    ) -> Result<Vec<(RouteDescriptor, Self::Route)>, LinkError>;
}

/// Supplies the blocks under one route.
pub(crate) trait RouteSource<S, G> {
    type Stop: StopSource<S, G>;

    /// The route's stops; scheduled stops come with the source of their
    /// schedule, plain stops with `None`.
    fn stops(
        self,
        stores: &mut Stores<S, G>,
    ) -> Result<Vec<(RawStop<S>, Option<Self::Stop>)>, LinkError>;
}

/// Supplies the schedule of one scheduled stop.
pub(crate) trait StopSource<S, G> {
    fn schedule(self, stores: &mut Stores<S, G>) -> Result<StopSchedule<G>, LinkError>;
}

/// Blocks in ingestion order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InOrder;

impl<S, G> LineSource<S, G> for InOrder {
    type Route = InOrder;

    fn routes(
        self,
        stores: &mut Stores<S, G>,
    ) -> Result<Vec<(RouteDescriptor, InOrder)>, LinkError> {
        let descriptors = stores.descriptors.pop_front()?;
        Ok(descriptors.into_iter().map(|d| (d, InOrder)).collect())
    }
}

impl<S, G> RouteSource<S, G> for InOrder {
    type Stop = InOrder;

    fn stops(
        self,
        stores: &mut Stores<S, G>,
    ) -> Result<Vec<(RawStop<S>, Option<InOrder>)>, LinkError> {
        let raw_stops = stores.routes.pop_front()?;
        Ok(raw_stops
            .into_iter()
            .map(|raw| {
                let stop = raw.has_schedule.then_some(InOrder);
                (raw, stop)
            })
            .collect())
    }
}

impl<S, G> StopSource<S, G> for InOrder {
    fn schedule(self, stores: &mut Stores<S, G>) -> Result<StopSchedule<G>, LinkError> {
        let day_types = stores.day_types.pop_front()?;
        let schedules_by_days = day_schedules(day_types, || stores.hours.pop_front())?;
        let legend = stores.legends.pop_front()?;
        Ok(StopSchedule {
            schedules_by_days,
            legend,
        })
    }
}

/// Pair each day type with its hour blocks. Days without service draw none.
pub(crate) fn day_schedules(
    day_types: DayTypeSet,
    mut next_hours: impl FnMut() -> Result<HourBlocks, LinkError>,
) -> Result<Vec<DayTypeSchedule>, LinkError> {
    day_types
        .into_iter()
        .map(|day| {
            Ok(if day.no_service {
                DayTypeSchedule::no_service(day.day_type)
            } else {
                DayTypeSchedule::with_departures(day.day_type, next_hours()?)
            })
        })
        .collect()
}

/// Assemble one transport line, drawing every block it needs through `source`.
pub(crate) fn link_line<S, G>(
    header: TransportLineHeader,
    line_types: &mut NameTable,
    stores: &mut Stores<S, G>,
    source: impl LineSource<S, G>,
) -> Result<TransportLine<S, G>, LinkError> {
    let type_index = line_types.intern(&header.type_name);

    let planned = source.routes(stores)?;
    let mut routes = Vec::with_capacity(planned.len());
    for (descriptor, route) in planned {
        routes.push(link_route(descriptor, stores, route)?);
    }

    debug!(
        line = %header.id,
        type_index,
        routes = routes.len(),
        "Linked transport line"
    );

    Ok(TransportLine {
        id: header.id,
        type_index,
        routes,
    })
}

fn link_route<S, G>(
    descriptor: RouteDescriptor,
    stores: &mut Stores<S, G>,
    source: impl RouteSource<S, G>,
) -> Result<Route<S, G>, LinkError> {
    let planned = source.stops(stores)?;
    let mut stops = Vec::with_capacity(planned.len());
    for (raw, schedule) in planned {
        let schedule = match schedule {
            Some(source) => Some(source.schedule(stores)?),
            None => None,
        };
        stops.push(Stop {
            info: raw.stop,
            schedule,
        });
    }
    trace!(route = %descriptor.code, stops = stops.len(), "Linked route");
    Ok(Route::new(descriptor, stops))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayTypeId, DayTypeLine, Endpoint};

    fn descriptor(code: &str) -> RouteDescriptor {
        RouteDescriptor {
            code: code.into(),
            direction: "A".into(),
            level: "1".into(),
            begin: Endpoint {
                name: "X".into(),
                city: "WA".into(),
            },
            end: Endpoint {
                name: "Y".into(),
                city: "WA".into(),
            },
        }
    }

    fn header(id: &str, type_name: &str) -> TransportLineHeader {
        TransportLineHeader {
            id: id.into(),
            type_name: type_name.into(),
        }
    }

    fn stores() -> Stores<&'static str, &'static str> {
        Stores::new(SessionId::next())
    }

    #[test]
    fn plain_stops_draw_nothing_else() {
        let mut stores = stores();
        stores.descriptors.push(vec![descriptor("R1")]);
        stores.routes.push(vec![
            RawStop {
                stop: "s1",
                has_schedule: false,
            },
            RawStop {
                stop: "s2",
                has_schedule: false,
            },
        ]);

        let mut types = NameTable::default();
        let line = link_line(
            header("1", "TRAM"),
            &mut types,
            &mut stores,
            InOrder,
        )
        .unwrap();

        assert_eq!(line.routes[0].stops.len(), 2);
        assert!(line.routes[0].stops.iter().all(|s| !s.is_scheduled()));
        assert!(stores.leftovers().is_empty());
    }

    #[test]
    fn scheduled_stop_draws_legend_and_serviced_hours() {
        let mut stores = stores();
        stores.descriptors.push(vec![descriptor("R1")]);
        stores.routes.push(vec![RawStop {
            stop: "s1",
            has_schedule: true,
        }]);
        stores.day_types.push(vec![
            DayTypeLine {
                day_type: Some(DayTypeId(0)),
                no_service: true,
            },
            DayTypeLine {
                day_type: Some(DayTypeId(1)),
                no_service: false,
            },
        ]);
        stores.hours.push(vec![]);
        stores.legends.push("legend");

        let mut types = NameTable::default();
        let line = link_line(
            header("1", "BUS"),
            &mut types,
            &mut stores,
            InOrder,
        )
        .unwrap();

        let schedule = line.routes[0].stops[0].schedule.as_ref().unwrap();
        assert_eq!(schedule.legend, "legend");
        assert!(schedule.schedules_by_days[0].is_no_service());
        assert_eq!(schedule.schedules_by_days[1].departures(), Some(&[][..]));
        assert!(stores.leftovers().is_empty());
    }

    #[test]
    fn missing_descriptor_block_underflows() {
        let mut stores = stores();
        let mut types = NameTable::default();
        let err = link_line(
            header("1", "BUS"),
            &mut types,
            &mut stores,
            InOrder,
        )
        .unwrap_err();
        assert_eq!(
            err,
            LinkError::QueueUnderflow {
                store: BlockKind::RouteDescriptors
            }
        );
    }

    #[test]
    fn leftovers_reported_per_store() {
        let mut stores = stores();
        stores.legends.push("a");
        stores.legends.push("b");
        stores.hours.push(vec![]);
        assert_eq!(
            stores.leftovers(),
            vec![(BlockKind::HourBlocks, 1), (BlockKind::Legends, 2)]
        );
    }
}
