//! Enforcement of single-document collections.
//!
//! A singleton collection holds zero or one document. Creation is checked
//! twice: once when deciding whether the actor may create at all, and again
//! right before the write. Both checks share [`SingletonGuard::occupancy`],
//! so they never disagree about an outcome.
//!
//! The storage layer is the final arbiter: the homepage settings table uses
//! a fixed primary key, so a create that slips past a failed check still
//! cannot produce a second row.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use obf_common::config::HomepageConfig;
use obf_common::{Actor, AppError, AppResult};
use obf_db::repositories::HomepageSettingsRepository;
use tracing::{debug, warn};

/// Message of the error raised when a second document is created.
pub const SINGLETON_VIOLATION: &str =
    "Only one Homepage Settings entry is allowed. Please edit the existing entry instead.";

/// Existence check for a singleton collection.
#[async_trait]
pub trait SingletonStore: Send + Sync {
    /// Whether the collection already holds a document.
    async fn exists(&self) -> AppResult<bool>;
}

#[async_trait]
impl SingletonStore for HomepageSettingsRepository {
    async fn exists(&self) -> AppResult<bool> {
        Self::exists(self).await
    }
}

/// Result of an existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// The store answered and holds no document.
    Empty,
    /// The store answered and holds a document.
    Occupied,
    /// The store could not be reached after every retry.
    Unreachable,
}

/// The kind of write being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    /// A new document is being inserted.
    Create,
    /// The existing document is being changed.
    Update,
}

/// Retry schedule for the existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one.
    pub attempts: u32,
    /// Delay after the first failure; doubled after each further failure.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Policy from the homepage configuration section.
    #[must_use]
    pub const fn from_config(config: &HomepageConfig) -> Self {
        Self {
            attempts: config.existence_check_attempts,
            backoff: Duration::from_millis(config.existence_check_backoff_ms),
        }
    }

    fn delay(&self, failed_attempts: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(failed_attempts.saturating_sub(1)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&HomepageConfig::default())
    }
}

/// Guard for a singleton collection.
#[derive(Clone)]
pub struct SingletonGuard {
    store: Arc<dyn SingletonStore>,
    retry: RetryPolicy,
}

impl SingletonGuard {
    /// Create a guard over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SingletonStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Check whether the collection holds a document, retrying failed checks.
    pub async fn occupancy(&self) -> Occupancy {
        let attempts = self.retry.attempts.max(1);

        for attempt in 1..=attempts {
            match self.store.exists().await {
                Ok(true) => return Occupancy::Occupied,
                Ok(false) => return Occupancy::Empty,
                Err(e) => {
                    debug!(attempt, attempts, error = %e, "Singleton existence check failed");
                    if attempt < attempts {
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                    }
                }
            }
        }

        Occupancy::Unreachable
    }

    /// Decide whether `actor` may create the document.
    ///
    /// Anonymous actors are always refused. An unreachable store fails open.
    pub async fn authorize_create(&self, actor: Option<&Actor>) -> bool {
        let Some(actor) = actor else {
            return false;
        };

        match self.occupancy().await {
            Occupancy::Empty => true,
            Occupancy::Occupied => false,
            Occupancy::Unreachable => {
                warn!(actor = %actor.name, "Existence check unreachable, allowing create");
                true
            }
        }
    }

    /// Reject a create when a document already exists.
    ///
    /// Updates always pass. An unreachable store fails open, matching
    /// [`Self::authorize_create`].
    pub async fn enforce_on_validate(&self, operation: WriteOperation) -> AppResult<()> {
        if operation != WriteOperation::Create {
            return Ok(());
        }

        match self.occupancy().await {
            Occupancy::Empty => Ok(()),
            Occupancy::Occupied => Err(AppError::Validation(SINGLETON_VIOLATION.to_string())),
            Occupancy::Unreachable => {
                warn!("Existence check unreachable, continuing create");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obf_common::ActorRole;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store answering from a script; repeats the last answer once exhausted.
    /// `None` stands for a failed query.
    struct ScriptedStore {
        answers: Mutex<VecDeque<Option<bool>>>,
        calls: AtomicUsize,
    }

    impl ScriptedStore {
        fn new(answers: Vec<Option<bool>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SingletonStore for ScriptedStore {
        async fn exists(&self) -> AppResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let answer = {
                let mut answers = self.answers.lock().unwrap();
                if answers.len() > 1 {
                    answers.pop_front().unwrap()
                } else {
                    *answers.front().unwrap()
                }
            };
            answer.ok_or_else(|| AppError::Database("connection refused".to_string()))
        }
    }

    fn guard(store: Arc<ScriptedStore>) -> SingletonGuard {
        SingletonGuard::new(
            store,
            RetryPolicy {
                attempts: 3,
                backoff: Duration::from_millis(1),
            },
        )
    }

    fn editor() -> Actor {
        Actor::new("editor", ActorRole::Editor)
    }

    #[tokio::test]
    async fn test_anonymous_is_refused_without_checking() {
        let store = ScriptedStore::new(vec![Some(false)]);
        let guard = guard(store.clone());

        assert!(!guard.authorize_create(None).await);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_authorize_follows_occupancy() {
        let empty = guard(ScriptedStore::new(vec![Some(false)]));
        let occupied = guard(ScriptedStore::new(vec![Some(true)]));

        assert!(empty.authorize_create(Some(&editor())).await);
        assert!(!occupied.authorize_create(Some(&editor())).await);
    }

    #[tokio::test]
    async fn test_enforce_rejects_second_create_with_validation_error() {
        let guard = guard(ScriptedStore::new(vec![Some(true)]));

        let err = guard
            .enforce_on_validate(WriteOperation::Create)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == SINGLETON_VIOLATION));
        assert!(guard.enforce_on_validate(WriteOperation::Update).await.is_ok());
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let store = ScriptedStore::new(vec![None, Some(true)]);
        let guard = guard(store.clone());

        assert_eq!(guard.occupancy().await, Occupancy::Occupied);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_open_in_both_guards() {
        let store = ScriptedStore::new(vec![None]);
        let guard = guard(store.clone());

        assert_eq!(guard.occupancy().await, Occupancy::Unreachable);
        assert_eq!(store.calls(), 3);

        assert!(guard.authorize_create(Some(&editor())).await);
        assert!(guard.enforce_on_validate(WriteOperation::Create).await.is_ok());
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            attempts: 4,
            backoff: Duration::from_millis(50),
        };
        assert_eq!(policy.delay(1), Duration::from_millis(50));
        assert_eq!(policy.delay(2), Duration::from_millis(100));
        assert_eq!(policy.delay(3), Duration::from_millis(200));
    }
}
