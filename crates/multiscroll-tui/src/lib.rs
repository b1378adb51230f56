pub mod app;
pub mod event;
pub mod host;
pub mod input;
pub mod scenario;
pub mod scroll;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use scenario::{Report, Scenario};
pub use theme::Theme;
