pub mod formats;
pub mod output_manager;

pub use formats::{at_handle, to_csv, to_text, Preview, PreviewBounds};
pub use output_manager::{AnalysisReport, DocumentSummary, OutputManager};
