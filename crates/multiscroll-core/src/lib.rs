pub mod config;
pub mod error;
pub mod sync;

pub use config::{
    AppConfig, CellSizerConfig, CellSizerKind, EasingType, FlingConfig, Orientation, SyncConfig,
    TableConfig,
};
pub use error::{Error, Result};
pub use sync::{Anchor, AlignError, CellSizer, ListHost, MultiScroller, ScrollState};
