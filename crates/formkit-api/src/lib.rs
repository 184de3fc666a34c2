//! # formkit-api
//!
//! The HTTP JSON API. Serves the form schema, accepts and manages
//! submissions, and exports them as CSV or JSON.
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/api/form-schema` | The active form schema |
//! | POST | `/api/submissions` | Validate and store a record |
//! | GET | `/api/submissions` | Paginated, searchable, sorted list |
//! | GET | `/api/submissions/export` | CSV or JSON download |
//! | GET | `/api/submissions/{id}` | One submission |
//! | PUT | `/api/submissions/{id}` | Validate and replace a record |
//! | DELETE | `/api/submissions/{id}` | Remove a submission |
//! | GET | `/health` | Liveness probe |

pub mod error;
pub mod handlers;
pub mod params;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::FormApp;
pub use state::AppState;
