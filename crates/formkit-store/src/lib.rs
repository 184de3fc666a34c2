//! # formkit-store
//!
//! The submission store: an ordered, in-memory collection of validated form
//! submissions keyed by an auto-incrementing id.
//!
//! ## Modules
//!
//! - [`submission`] - The `Submission` record and its timestamp format
//! - [`query`] - List parameters, search, sorting, and page slicing
//! - [`store`] - `SubmissionStore` with create, list, get, update, delete
//! - [`clock`] - Injectable time source for `createdAt`
//! - [`export`] - CSV and JSON exporters

pub mod clock;
pub mod export;
pub mod query;
pub mod store;
pub mod submission;

pub use clock::{Clock, ManualClock, SystemClock};
pub use export::{CsvExporter, ExportFormat, Exporter, JsonExporter};
pub use query::{ListParams, SortOrder, SubmissionPage, MAX_PAGE_SIZE};
pub use store::SubmissionStore;
pub use submission::Submission;
