//! Season statistics dashboard.

mod render;
mod state;

pub use render::render_dashboard;
pub use state::{DashboardState, View};
