use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use reelprice_core::connector::{CatalogProvider, DetailProvider, ReelConnector};
use reelprice_core::{MovieDetail, MovieRecord, Provider, ReelError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ReelError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
    /// Fail the next `times` calls with `error`, then behave as `then`.
    FailTimes {
        /// Remaining failures.
        times: u32,
        /// Error returned while failures remain.
        error: ReelError,
        /// Behaviour once the failures are used up.
        then: Box<MockBehavior<T>>,
    },
}

impl<T> MockBehavior<T> {
    /// Shorthand for [`MockBehavior::FailTimes`].
    #[must_use]
    pub fn fail_times(times: u32, error: ReelError, then: Self) -> Self {
        Self::FailTimes {
            times,
            error,
            then: Box::new(then),
        }
    }

    // Consumes one step of a `FailTimes` chain and returns what this call does.
    fn step(&mut self) -> Self
    where
        T: Clone,
    {
        loop {
            match self {
                Self::FailTimes { times: 0, then, .. } => {
                    let next = std::mem::replace(then.as_mut(), Self::Hang);
                    *self = next;
                }
                Self::FailTimes { times, error, .. } => {
                    *times -= 1;
                    return Self::Fail(error.clone());
                }
                other => return other.clone(),
            }
        }
    }
}

/// One recorded call against a [`DynamicMockConnector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// A catalog listing.
    Catalog,
    /// A detail fetch for the given id.
    Detail(String),
}

#[derive(Default)]
struct InternalState {
    catalog_rule: Option<MockBehavior<Vec<MovieRecord>>>,
    detail_rules: HashMap<String, MockBehavior<MovieDetail>>,
    calls: Vec<(MockCall, Instant)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `catalog` calls.
    pub async fn set_catalog_behavior(&self, behavior: MockBehavior<Vec<MovieRecord>>) {
        let mut guard = self.state.lock().await;
        guard.catalog_rule = Some(behavior);
    }

    /// Set the behavior for `detail` calls for a specific id.
    pub async fn set_detail_behavior(
        &self,
        id: impl Into<String>,
        behavior: MockBehavior<MovieDetail>,
    ) {
        let mut guard = self.state.lock().await;
        guard.detail_rules.insert(id.into(), behavior);
    }

    /// Every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<MockCall> {
        let guard = self.state.lock().await;
        guard.calls.iter().map(|(c, _)| c.clone()).collect()
    }

    /// Arrival instants of every call, as seen by the tokio clock.
    pub async fn call_times(&self) -> Vec<Instant> {
        let guard = self.state.lock().await;
        guard.calls.iter().map(|(_, at)| *at).collect()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.catalog_rule = None;
        guard.detail_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    provider: Provider,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector for `provider` and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
        provider: Provider,
    ) -> (Arc<dyn ReelConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            provider,
            state,
        });
        (me as Arc<dyn ReelConnector>, controller)
    }

    async fn run<T>(behavior: Option<MockBehavior<T>>, unset: ReelError) -> Result<T, ReelError> {
        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            Some(MockBehavior::FailTimes { error, .. }) => Err(error),
            None => Err(unset),
        }
    }
}

#[async_trait]
impl ReelConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn provider(&self) -> Provider {
        self.provider
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_detail_provider(&self) -> Option<&dyn DetailProvider> {
        Some(self as &dyn DetailProvider)
    }
}

#[async_trait]
impl CatalogProvider for DynamicMockConnector {
    async fn catalog(&self) -> Result<Vec<MovieRecord>, ReelError> {
        // Resolve this call's behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push((MockCall::Catalog, Instant::now()));
            guard.catalog_rule.as_mut().map(MockBehavior::step)
        };
        Self::run(behavior, ReelError::connector(self.name, "no catalog behavior")).await
    }
}

#[async_trait]
impl DetailProvider for DynamicMockConnector {
    async fn detail(&self, id: &str) -> Result<MovieDetail, ReelError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .calls
                .push((MockCall::Detail(id.to_string()), Instant::now()));
            guard.detail_rules.get_mut(id).map(MockBehavior::step)
        };
        Self::run(
            behavior,
            ReelError::connector(self.name, format!("no detail behavior for {id}")),
        )
        .await
    }
}
