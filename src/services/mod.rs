pub mod chrome_navigator;
pub mod exporter;
pub mod extractor;
pub mod http_navigator;
pub mod navigator;
pub mod reporter;

pub use chrome_navigator::ChromeNavigator;
pub use exporter::{export_filename, export_rows};
pub use http_navigator::HttpNavigator;
pub use navigator::{LoadOutcome, Navigator};
pub use reporter::{RecordingReporter, StatusReporter, TracingReporter};
