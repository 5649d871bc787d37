//! Assembly of the schedule tree from flat dump blocks.
//!
//! The dump lists its blocks flat, with no parent/child identifiers; the
//! nesting line → route → stop → day type → hour is implied by the order
//! the blocks appear in. A [`Session`] stores each decoded block in a
//! per-kind queue and rebuilds the tree when linked:
//!
//! - [`Session::link_transport_lines`] walks the tree and pops each block
//!   in ingestion order, so blocks must be ingested exactly in dump order.
//! - [`Session::link_with_plan`] walks the tree and takes each block by the
//!   [`Handle`] the plan puts there, so a misplaced block is reported rather
//!   than silently grafted onto the wrong stop.

mod assembly;
mod config;
mod error;
mod link;
mod plan;
mod store;


pub use assembly::Session;
pub use config::{ConfigError, LEFTOVERS_VAR, LeftoverPolicy, NO_SERVICE_MARKER_VAR, ParserConfig};
pub use error::{BlockKind, LinkError};
pub use plan::{
    DayTypeSet, HourBlocks, LinePlan, LinkPlan, RouteDescriptors, RoutePlan, StopList, StopPlan,
};
pub use store::{Handle, SessionId};
