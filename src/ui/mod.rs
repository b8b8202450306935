pub mod output;
pub mod progress;

pub use output::{OutputFormatter, OutputMode, PreviewOptions};
pub use progress::ProgressManager;
