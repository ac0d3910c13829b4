//! # Mock Store
//!
//! Utilities for testing code that talks to a store, without spawning a real actor.
//!
//! Use [`MockStore::new`] to get a scripted store, queue replies with the `expect_*`
//! builders, hand [`MockStore::client`] to the code under test, and finish with
//! [`MockStore::verify`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::framework::{Resource, StoreClient, StoreError, StoreRequest};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// One scripted reply, matched against the next request the mock receives.
enum Expectation<T: Resource> {
    Save(Result<T, StoreError>),
    Replace(Result<Option<T>, StoreError>),
    FindById(T::Id, Result<Option<T>, StoreError>),
    FindByIndex(String, Result<Vec<T>, StoreError>),
    FindAll(Result<Vec<T>, StoreError>),
    DeleteById(T::Id, Result<bool, StoreError>),
    DeleteAll(Result<usize, StoreError>),
    Count(Result<usize, StoreError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::<Course>::new();
/// mock.expect_find_by_id(1).return_ok(None);
/// mock.expect_save().return_err(StoreError::Closed);
///
/// let service = CourseService::new(mock.client());
/// // Use service in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockStore<T: Resource> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Resource> MockStore<T> {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().expect("mock queue poisoned").pop_front();

                match (request, expectation) {
                    (StoreRequest::Save { respond_to, .. }, Some(Expectation::Save(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Replace { respond_to, .. },
                        Some(Expectation::Replace(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::FindById { id, respond_to },
                        Some(Expectation::FindById(expected, response)),
                    ) => {
                        assert_eq!(id, expected, "find_by_id called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::FindByIndex { key, respond_to },
                        Some(Expectation::FindByIndex(expected, response)),
                    ) => {
                        assert_eq!(key, expected, "find_by_index called with unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::FindAll { respond_to }, Some(Expectation::FindAll(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::DeleteById { id, respond_to },
                        Some(Expectation::DeleteById(expected, response)),
                    ) => {
                        assert_eq!(id, expected, "delete_by_id called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::DeleteAll { respond_to },
                        Some(Expectation::DeleteAll(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Count { respond_to }, Some(Expectation::Count(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects a `save` operation.
    pub fn expect_save(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Save)
    }

    /// Expects a `replace` operation.
    pub fn expect_replace(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Replace)
    }

    /// Expects a `find_by_id` operation for `id`.
    pub fn expect_find_by_id(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::FindById(id, response))
    }

    /// Expects a `find_by_index` operation for `key`.
    pub fn expect_find_by_index(&mut self, key: impl Into<String>) -> ExpectationBuilder<T, Vec<T>> {
        let key = key.into();
        self.builder(move |response| Expectation::FindByIndex(key, response))
    }

    /// Expects a `find_all` operation.
    pub fn expect_find_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::FindAll)
    }

    /// Expects a `delete_by_id` operation for `id`.
    pub fn expect_delete_by_id(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        self.builder(move |response| Expectation::DeleteById(id, response))
    }

    /// Expects a `delete_all` operation.
    pub fn expect_delete_all(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::DeleteAll)
    }

    /// Expects a `count` operation.
    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::Count)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock queue poisoned").len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: Resource> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that records the reply for one expected request.
pub struct ExpectationBuilder<T: Resource, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T>>,
    expectations: Queue<T>,
}

impl<T: Resource, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .expect("mock queue poisoned")
            .push_back(expectation);
    }
}
