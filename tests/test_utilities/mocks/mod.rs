/// Mock implementations for testing
mod fake_catalog;
mod mock_progress_reporter;

#[allow(unused_imports)]
pub use fake_catalog::{FakeCatalog, FAKE_BASE};
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
