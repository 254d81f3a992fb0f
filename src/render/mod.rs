//! Output rendering: the text summary and the per-chart HTML pages.

pub mod html;
pub mod text;

pub use html::render_chart_page;
pub use text::render_summary;
