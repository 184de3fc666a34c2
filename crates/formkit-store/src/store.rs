//! The in-memory submission store.
//!
//! [`SubmissionStore`] owns the active schema and a single mutex around the
//! submission list and id counter. Every operation holds the lock for its
//! whole duration, so writes are serialized and reads always observe the
//! latest completed write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use formkit_core::{FormError, FormResult};
use formkit_forms::{validate, FormSchema, Record};

use crate::clock::{Clock, SystemClock};
use crate::export::ExportFormat;
use crate::query::{apply_ordering, apply_search, ListParams, SubmissionPage};
use crate::submission::Submission;

#[derive(Debug)]
struct Inner {
    submissions: Vec<Submission>,
    next_id: u64,
}

/// Ordered collection of validated submissions.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use formkit_forms::builtin::onboarding_schema;
/// use formkit_store::{ListParams, SubmissionStore};
/// use serde_json::json;
///
/// let store = SubmissionStore::new(Arc::new(onboarding_schema()));
/// let record = json!({"name": "Al", "email": "a@b.com", "gender": "male"});
/// let created = store.submit(record.as_object().cloned().unwrap()).unwrap();
/// assert_eq!(created.id, 1);
///
/// let page = store.list(&ListParams::new()).unwrap();
/// assert_eq!(page.total, 1);
/// ```
pub struct SubmissionStore {
    schema: Arc<FormSchema>,
    clock: Box<dyn Clock>,
    inner: Mutex<Inner>,
}

impl SubmissionStore {
    /// Creates an empty store that timestamps with the system clock.
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self::with_clock(schema, SystemClock)
    }

    /// Creates an empty store with a custom time source.
    pub fn with_clock(schema: Arc<FormSchema>, clock: impl Clock + 'static) -> Self {
        Self {
            schema,
            clock: Box::new(clock),
            inner: Mutex::new(Inner {
                submissions: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the schema submissions are validated against.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the number of stored submissions.
    pub fn len(&self) -> usize {
        self.lock().submissions.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `data` without validating it, assigning the next id and the
    /// current time.
    pub fn create(&self, data: Record) -> Submission {
        let mut inner = self.lock();
        let submission = Submission {
            id: inner.next_id,
            data,
            created_at: self.clock.now(),
        };
        inner.next_id += 1;
        inner.submissions.push(submission.clone());
        tracing::info!(id = submission.id, "Submission created");
        submission
    }

    /// Validates `data` against the schema and appends it on success.
    pub fn submit(&self, data: Record) -> FormResult<Submission> {
        let errors = validate(&self.schema, &data);
        if !errors.is_empty() {
            return Err(FormError::Validation(errors));
        }
        Ok(self.create(data))
    }

    /// Returns one page of submissions filtered by `params.search` and
    /// ordered by `params.sort_by` / `params.sort_order`.
    pub fn list(&self, params: &ListParams) -> FormResult<SubmissionPage> {
        params.check()?;
        let matching = self.select(params);
        Ok(SubmissionPage::paginate(matching, params.page, params.limit))
    }

    /// Returns the submission with `id`.
    pub fn get(&self, id: u64) -> FormResult<Submission> {
        self.lock()
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(FormError::submission_not_found)
    }

    /// Replaces the data of submission `id`, keeping its id and `createdAt`.
    ///
    /// Validation runs first, so an invalid record is rejected even when
    /// `id` does not exist, and the stored record is never touched on
    /// failure.
    pub fn update(&self, id: u64, data: Record) -> FormResult<Submission> {
        let errors = validate(&self.schema, &data);
        if !errors.is_empty() {
            return Err(FormError::Validation(errors));
        }

        let mut inner = self.lock();
        let submission = inner
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(FormError::submission_not_found)?;
        submission.data = data;
        tracing::info!(id, "Submission updated");
        Ok(submission.clone())
    }

    /// Removes submission `id`. Its id is never handed out again.
    pub fn delete(&self, id: u64) -> FormResult<()> {
        let mut inner = self.lock();
        let index = inner
            .submissions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(FormError::submission_not_found)?;
        inner.submissions.remove(index);
        tracing::info!(id, "Submission deleted");
        Ok(())
    }

    /// Renders every submission matching `params.search`, in
    /// `params.sort_by` / `params.sort_order` order, without pagination.
    pub fn export(&self, format: ExportFormat, params: &ListParams) -> FormResult<String> {
        let matching = self.select(params);
        tracing::debug!(?format, count = matching.len(), "Exporting submissions");
        format.exporter().export(&self.schema, &matching)
    }

    fn select(&self, params: &ListParams) -> Vec<Submission> {
        let snapshot = self.lock().submissions.clone();
        let mut matching = apply_search(snapshot, params.search.as_deref());
        apply_ordering(&mut matching, &params.sort_by, params.sort_order);
        matching
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use formkit_forms::builtin::onboarding_schema;
    use serde_json::json;

    use super::*;
    use crate::clock::ManualClock;

    fn store() -> SubmissionStore {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        SubmissionStore::with_clock(
            Arc::new(onboarding_schema()),
            ManualClock::new(start, TimeDelta::seconds(1)),
        )
    }

    fn record(name: &str) -> Record {
        json!({"name": name, "email": "x@y.com", "gender": "other"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = store();
        assert_eq!(store.create(record("Al")).id, 1);
        assert_eq!(store.create(record("Bo")).id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_does_not_validate() {
        let store = store();
        let created = store.create(Record::new());
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_submit_rejects_invalid() {
        let store = store();
        let err = store.submit(Record::new()).unwrap_err();
        let FormError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = store();
        store.create(record("Al"));
        let second = store.create(record("Bo"));
        store.delete(second.id).unwrap();
        assert_eq!(store.create(record("Cy")).id, 3);
    }

    #[test]
    fn test_get() {
        let store = store();
        let created = store.create(record("Al"));
        assert_eq!(store.get(created.id).unwrap(), created);
        assert!(matches!(store.get(42), Err(FormError::NotFound(_))));
    }

    #[test]
    fn test_update_preserves_id_and_timestamp() {
        let store = store();
        let created = store.create(record("Al"));
        let updated = store.update(created.id, record("Albert")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.data["name"], "Albert");
    }

    #[test]
    fn test_lock_survives_poisoning() {
        let store = Arc::new(store());
        let clone = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = clone.inner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert_eq!(store.create(record("Al")).id, 1);
    }
}
