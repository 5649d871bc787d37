//! The parse session: block ingestion and the terminal link step.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::decoders::{LegendDecoder, LegendListDecoder, RouteDecoder, StopListDecoder};
use crate::domain::{
    DayTypeCatalog, NameTable, ScheduleDump, TransportLine, TransportLineHeader, decode_day_type_set,
    decode_route_descriptors, decode_schedule_block, decode_transport_lines,
};

use super::config::{LeftoverPolicy, ParserConfig};
use super::error::{BlockKind, LinkError};
use super::link::{InOrder, Stores, link_line};
use super::plan::{DayTypeSet, HourBlocks, LinkPlan, RouteDescriptors, StopList};
use super::store::{Handle, SessionId};

/// State for parsing one dump.
///
/// Blocks are ingested one at a time, each returning a [`Handle`]. Once
/// every block is in, the session is consumed by either
/// [`link_transport_lines`](Session::link_transport_lines), which assumes
/// blocks arrived in dump order, or [`link_with_plan`](Session::link_with_plan),
/// which places them by handle.
///
/// The day-type catalog is the only state shared with other sessions, and
/// it is never modified.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use timetable_dump::domain::DayTypeCatalog;
/// use timetable_dump::session::Session;
///
/// let catalog = Arc::new(DayTypeCatalog::from_codes(["MF"]));
/// let mut session = Session::new(catalog);
/// session.ingest_route_descriptor_block("");
///
/// let dump = session.link_transport_lines("          101   BUS").unwrap();
/// assert_eq!(dump.schedule[0].id, "101");
/// assert_eq!(dump.line_type_names, vec!["BUS"]);
/// ```
pub struct Session<R: RouteDecoder = StopListDecoder, L: LegendDecoder = LegendListDecoder> {
    id: SessionId,
    config: ParserConfig,
    catalog: Arc<DayTypeCatalog>,
    route_decoder: R,
    legend_decoder: L,
    stores: Stores<R::Stop, L::Legend>,
}

impl Session {
    /// Create a session with the default decoders and configuration.
    pub fn new(catalog: Arc<DayTypeCatalog>) -> Self {
        Self::with_config(catalog, ParserConfig::default())
    }

    pub fn with_config(catalog: Arc<DayTypeCatalog>, config: ParserConfig) -> Self {
        Self::with_decoders(
            catalog,
            config,
            StopListDecoder::new(),
            LegendListDecoder::new(),
        )
    }
}

impl<R: RouteDecoder, L: LegendDecoder> Session<R, L> {
    /// Create a session with custom route and legend decoders.
    pub fn with_decoders(
        catalog: Arc<DayTypeCatalog>,
        config: ParserConfig,
        route_decoder: R,
        legend_decoder: L,
    ) -> Self {
        let id = SessionId::next();
        debug!(session = ?id, day_types = catalog.len(), "Starting parse session");
        Self {
            id,
            config,
            catalog,
            route_decoder,
            legend_decoder,
            stores: Stores::new(id),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decode a route block (the stops of one route) and store it.
    pub fn ingest_route_block(&mut self, text: &str) -> Handle<StopList<R::Stop>> {
        let stops = self.route_decoder.decode(text);
        self.stores.routes.push(stops)
    }

    /// Decode the legend of one scheduled stop and store it.
    pub fn ingest_legend_block(&mut self, text: &str) -> Handle<L::Legend> {
        let legend = self.legend_decoder.decode(text);
        self.stores.legends.push(legend)
    }

    /// Decode the hour blocks of one scheduled stop for one day type.
    pub fn ingest_schedule_block(&mut self, text: &str) -> Handle<HourBlocks> {
        self.stores.hours.push(decode_schedule_block(text))
    }

    /// Decode the day-type set of one scheduled stop.
    pub fn ingest_day_type_set_block(&mut self, text: &str) -> Handle<DayTypeSet> {
        let set = decode_day_type_set(text, &self.catalog, &self.config.no_service_marker);
        self.stores.day_types.push(set)
    }

    /// Decode the route descriptors of one transport line.
    pub fn ingest_route_descriptor_block(&mut self, text: &str) -> Handle<RouteDescriptors> {
        self.stores.descriptors.push(decode_route_descriptors(text))
    }

    /// Number of blocks of a kind ingested but not yet linked.
    pub fn pending(&self, kind: BlockKind) -> usize {
        self.stores.remaining(kind)
    }

    /// Link every transport line of the dump, drawing blocks in the order
    /// they were ingested.
    ///
    /// `text` is the transport-line block, one line per transport line. The
    /// blocks must have been ingested in dump order: route descriptors and
    /// routes once per line, day-type sets and legends once per scheduled
    /// stop, schedules once per day type with service. Running out of any
    /// kind of block fails with [`LinkError::QueueUnderflow`].
    pub fn link_transport_lines(
        mut self,
        text: &str,
    ) -> Result<ScheduleDump<R::Stop, L::Legend>, LinkError> {
        let headers = decode_transport_lines(text);
        let mut line_types = NameTable::default();
        let mut schedule = Vec::with_capacity(headers.len());

        for header in headers {
            schedule.push(link_line(header, &mut line_types, &mut self.stores, InOrder)?);
        }

        self.finish(line_types, schedule)
    }

    /// Link the dump following an explicit plan.
    ///
    /// Every handle in the plan must come from this session and be used
    /// exactly once. Each line plan needs one route plan per descriptor,
    /// each route plan one stop plan per scheduled stop, and each stop plan
    /// one departures handle per day type with service; any other count
    /// fails with [`LinkError::PlanShapeMismatch`].
    pub fn link_with_plan(
        mut self,
        plan: LinkPlan<R::Stop, L::Legend>,
    ) -> Result<ScheduleDump<R::Stop, L::Legend>, LinkError> {
        let mut line_types = NameTable::default();
        let mut schedule = Vec::with_capacity(plan.lines.len());

        for line in plan.lines {
            let header = TransportLineHeader::decode(&line.line);
            schedule.push(link_line(header, &mut line_types, &mut self.stores, line)?);
        }

        self.finish(line_types, schedule)
    }

    fn finish(
        self,
        line_types: NameTable,
        schedule: Vec<TransportLine<R::Stop, L::Legend>>,
    ) -> Result<ScheduleDump<R::Stop, L::Legend>, LinkError> {
        for (store, count) in self.stores.leftovers() {
            match self.config.leftovers {
                LeftoverPolicy::Ignore => {}
                LeftoverPolicy::Warn => {
                    warn!(%store, count, "Blocks ingested but never linked");
                }
                LeftoverPolicy::Reject => {
                    return Err(LinkError::LeftoverBlocks { store, count });
                }
            }
        }

        debug!(
            session = ?self.id,
            lines = schedule.len(),
            line_types = line_types.len(),
            "Linked schedule"
        );

        Ok(ScheduleDump {
            line_type_names: line_types.into_names(),
            streets: self.route_decoder.into_streets(),
            texts: self.legend_decoder.into_texts(),
            schedule,
        })
    }
}
