//! Session scripts: a recorded sequence of dump blocks replayed through a
//! [`Session`].
//!
//! A script is JSON holding the day-type catalog, the blocks in the order
//! the dump presents them, and the transport-line block:
//!
//! ```json
//! {
//!   "dayTypes": [{ "code": "MF" }, { "code": "SA" }],
//!   "blocks": [
//!     { "kind": "routeDescriptors", "text": "..." },
//!     { "kind": "routes", "text": "..." }
//!   ],
//!   "lines": "..."
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::{DayTypeCatalog, DayTypeEntry, ScheduleDump};
use crate::session::{BlockKind, LinkError, ParserConfig, Session};

/// Errors from loading or replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Script file could not be read
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Script is not valid JSON or has the wrong shape
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),

    /// Blocks did not link into a schedule
    #[error("link failed: {0}")]
    Link(#[from] LinkError),
}

/// One recorded block.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptBlock {
    pub kind: BlockKind,
    pub text: String,
}

/// A whole recorded dump.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionScript {
    pub day_types: Vec<DayTypeEntry>,
    pub blocks: Vec<ScriptBlock>,
    /// The transport-line block.
    pub lines: String,
}

impl SessionScript {
    /// Load a script from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Feed every block through a fresh session in script order and link.
    pub fn replay(&self, config: ParserConfig) -> Result<ScheduleDump, ScriptError> {
        let catalog = Arc::new(DayTypeCatalog::from_entries(&self.day_types));
        let mut session = Session::with_config(catalog, config);

        for block in &self.blocks {
            match block.kind {
                BlockKind::RouteDescriptors => {
                    session.ingest_route_descriptor_block(&block.text);
                }
                BlockKind::Routes => {
                    session.ingest_route_block(&block.text);
                }
                BlockKind::DayTypeSets => {
                    session.ingest_day_type_set_block(&block.text);
                }
                BlockKind::HourBlocks => {
                    session.ingest_schedule_block(&block.text);
                }
                BlockKind::Legends => {
                    session.ingest_legend_block(&block.text);
                }
            }
        }
        info!(blocks = self.blocks.len(), "Replayed script blocks");

        Ok(session.link_transport_lines(&self.lines)?)
    }
}
