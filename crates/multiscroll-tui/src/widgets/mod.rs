mod status_bar;
mod synced_table;

pub use status_bar::StatusBarWidget;
pub use synced_table::{fit, slice_columns, SyncedTableWidget};
