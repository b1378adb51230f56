use std::time::Duration;

use multiscroll_core::sync::{Anchor, MultiScroller, Orientation};
use multiscroll_core::{AppConfig, CellSizerConfig, CellSizerKind, SyncConfig, TableConfig};

use crate::host::{ListId, SimHost, SimList};
use crate::input::Action;
use crate::theme::Theme;

/// Columns moved by one drag key press
const DRAG_STEP: i32 = 4;
/// Release velocity for a fling key press, in columns per second
const FLING_VELOCITY: f64 = 400.0;
/// Width taken by the row label in front of each list
pub const LABEL_WIDTH: u16 = 6;

/// Application state for the synchronized table demo
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    pub theme: Theme,
    /// Toolkit owning one list per table row
    pub host: SimHost,
    pub scroller: MultiScroller<ListId>,
    /// Settings a fresh group is built from after a clear
    sync: SyncConfig,
    /// Row lists, top to bottom
    pub rows: Vec<ListId>,
    /// Width of every column, shared by all rows
    pub column_widths: Vec<u32>,
    /// Currently selected row
    pub selected: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let table = &config.ui.table;
        let column_widths = column_widths(table);
        let sync = SyncConfig {
            orientation: Orientation::Horizontal,
            cell_sizer: if table.variable_widths {
                CellSizerConfig {
                    kind: CellSizerKind::Dynamic,
                    size: 0,
                }
            } else {
                CellSizerConfig {
                    kind: CellSizerKind::Fixed,
                    size: table.cell_width,
                }
            },
        };

        let mut host = SimHost::new(Orientation::Horizontal, config.ui.fling.clone());
        let rows: Vec<ListId> = (0..table.rows)
            .map(|_| host.push(SimList::new(column_widths.clone(), 80)))
            .collect();

        let mut app = Self {
            config: config.clone(),
            theme: Theme::default(),
            host,
            scroller: MultiScroller::from_config(&sync),
            sync,
            rows,
            column_widths,
            selected: 0,
            should_quit: false,
            status_message: None,
        };
        app.add_all();
        app
    }

    pub fn selected_row(&self) -> Option<ListId> {
        self.rows.get(self.selected).copied()
    }

    /// The group's current anchor, if it can be resolved
    pub fn anchor(&self) -> Option<Anchor> {
        self.scroller.anchor().ok()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Flings are running and need frequent ticks
    pub fn needs_fast_update(&self) -> bool {
        self.host.is_flinging()
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::None {
            self.status_message = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.selected = self.selected.saturating_sub(1),
            Action::MoveDown => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            Action::DragLeft => self.drag(-DRAG_STEP),
            Action::DragRight => self.drag(DRAG_STEP),
            Action::FlingLeft => self.fling(-FLING_VELOCITY),
            Action::FlingRight => self.fling(FLING_VELOCITY),
            Action::Touch => self.touch(),
            Action::ToggleAttach => self.toggle_attach(),
            Action::AddAll => {
                self.add_all();
                self.set_status("All rows added");
            }
            Action::Clear => self.clear(),
            Action::None => {}
        }

        self.frame();
    }

    /// Advance flings by `dt`
    pub fn on_tick(&mut self, dt: Duration) {
        if self.host.is_flinging() {
            self.host.tick(dt);
            self.frame();
        }
    }

    /// Fit every row to a terminal `width` columns wide
    pub fn resize(&mut self, width: u16) {
        // Borders and row label
        let viewport = width.saturating_sub(LABEL_WIDTH + 2).max(1) as u32;
        for id in self.rows.clone() {
            self.host.set_viewport(id, viewport);
        }
        self.frame();
    }

    fn add_all(&mut self) {
        for id in self.rows.clone() {
            self.scroller.add(&mut self.host, id);
        }
        self.frame();
    }

    /// Empty the group and start over from a new one at displacement 0.
    /// Measured sizes go with the old group, so its displacement could
    /// no longer be resolved for rows added back later.
    fn clear(&mut self) {
        self.scroller.clear(&mut self.host);
        self.scroller = MultiScroller::from_config(&self.sync);
        self.set_status("Group cleared, rows scroll on their own");
    }

    fn drag(&mut self, delta: i32) {
        if let Some(id) = self.selected_row() {
            self.host.drag(id, delta);
            self.host.release(id, 0.0);
        }
    }

    fn fling(&mut self, velocity: f64) {
        if let Some(id) = self.selected_row() {
            self.host.drag(id, velocity.signum() as i32);
            self.host.release(id, velocity);
        }
    }

    fn touch(&mut self) {
        use multiscroll_core::sync::TouchAction;

        if let Some(id) = self.selected_row() {
            self.host.touch(id, TouchAction::Down);
            self.host.touch(id, TouchAction::Up);
            self.set_status(format!("Touched row {}", id));
        }
    }

    fn toggle_attach(&mut self) {
        let Some(id) = self.selected_row() else {
            return;
        };
        let attached = self.host.list(id).is_some_and(SimList::is_attached);
        if attached {
            self.host.detach(id);
            self.set_status(format!("Row {} detached", id));
        } else {
            self.host.attach(id);
            self.set_status(format!("Row {} attached", id));
        }
    }

    /// One toolkit frame: pending layouts, then notifications
    fn frame(&mut self) {
        self.host.layout_pending();
        self.host.dispatch(&mut self.scroller);
    }
}

/// Column widths for the table. Variable widths repeat a fixed pattern
/// around the configured base width.
pub fn column_widths(table: &TableConfig) -> Vec<u32> {
    let base = table.cell_width.max(4);
    (0..table.columns)
        .map(|column| {
            if table.variable_widths {
                base - 3 + ((column * 5) % 7) as u32
            } else {
                base
            }
        })
        .collect()
}
