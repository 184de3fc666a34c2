//! Shared handler state.

use std::sync::Arc;

use formkit_core::{FormResult, Settings};
use formkit_forms::{FormSchema, SchemaProvider};
use formkit_store::SubmissionStore;

/// State shared by every handler: the submission store, which also owns
/// the active schema.
#[derive(Clone)]
pub struct AppState {
    store: Arc<SubmissionStore>,
}

impl AppState {
    /// Wraps an existing store.
    pub const fn new(store: Arc<SubmissionStore>) -> Self {
        Self { store }
    }

    /// Creates an empty store for `schema`.
    pub fn for_schema(schema: FormSchema) -> Self {
        Self::new(Arc::new(SubmissionStore::new(Arc::new(schema))))
    }

    /// Resolves the schema from `settings` and creates an empty store.
    pub fn from_settings(settings: &Settings) -> FormResult<Self> {
        let provider = SchemaProvider::from_settings(settings)?;
        Ok(Self::new(Arc::new(SubmissionStore::new(provider.shared()))))
    }

    /// Returns the submission store.
    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }
}
