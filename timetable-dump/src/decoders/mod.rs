//! Decoders for route and legend blocks.
//!
//! These sit at a seam: the session only relies on the [`RouteDecoder`] and
//! [`LegendDecoder`] traits, so a dump variant with different stop or legend
//! layouts can plug in its own decoders. The line-oriented implementations
//! here are the defaults.

mod legend;
mod stops;

pub use legend::{Legend, LegendDecoder, LegendEntry, LegendListDecoder};
pub use stops::{RawStop, RouteDecoder, StopInfo, StopListDecoder};
