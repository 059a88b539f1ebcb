// Page layout for the composed document: static font metrics, page geometry,
// and node-boundary pagination with fill analysis.

pub mod font_metrics;
pub mod paginate;

// Re-export the public API consumed by the composer and handlers.
pub use font_metrics::{a4_page_setup, PageSetup};
pub use paginate::{analyze_fill, paginate, PageFillAnalysis};
