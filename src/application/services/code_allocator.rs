//! Unique short code allocation.
//!
//! A candidate is checked against its namespace before insert, and the insert
//! itself is retried with a fresh candidate when the store reports a unique
//! violation. The second step closes the check-then-insert race between
//! concurrent requests without explicit locking.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::ShortCode;
use crate::error::AppError;

/// Default cap on candidates tried per allocation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 32;

/// A set of taken codes for one entity kind.
#[async_trait]
pub trait CodeNamespace: Send + Sync {
    /// Namespace name used in logs and error details.
    fn name(&self) -> &'static str;

    /// Returns true if `code` is already used in this namespace.
    async fn is_taken(&self, code: &ShortCode) -> Result<bool, AppError>;
}

type Generator = Arc<dyn Fn() -> ShortCode + Send + Sync>;

/// Allocates short codes that are unique within a [`CodeNamespace`].
#[derive(Clone)]
pub struct CodeAllocator {
    max_attempts: usize,
    generate: Generator,
}

impl CodeAllocator {
    /// Creates an allocator drawing random candidates.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: usize) -> Self {
        Self::with_generator(max_attempts, ShortCode::generate)
    }

    /// Creates an allocator with a custom candidate source.
    pub fn with_generator(
        max_attempts: usize,
        generate: impl Fn() -> ShortCode + Send + Sync + 'static,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            generate: Arc::new(generate),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the first candidate not present in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if every attempt collides, which points
    /// to a near-exhausted namespace or a broken store rather than bad luck.
    pub async fn allocate<N>(&self, namespace: &N) -> Result<ShortCode, AppError>
    where
        N: CodeNamespace + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = (self.generate)();

            if !namespace.is_taken(&candidate).await? {
                return Ok(candidate);
            }

            tracing::debug!(
                namespace = namespace.name(),
                attempt,
                code = %candidate,
                "Short code candidate already taken"
            );
        }

        Err(self.exhausted(namespace.name()))
    }

    /// Allocates a code and runs `insert` with it, retrying on
    /// [`AppError::DuplicateCode`].
    ///
    /// Any other error from `insert` is returned unchanged.
    pub async fn insert_unique<N, T, F, Fut>(
        &self,
        namespace: &N,
        mut insert: F,
    ) -> Result<T, AppError>
    where
        N: CodeNamespace + ?Sized,
        F: FnMut(ShortCode) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        for attempt in 1..=self.max_attempts {
            let code = self.allocate(namespace).await?;

            match insert(code.clone()).await {
                Err(e) if e.is_duplicate_code() => {
                    tracing::warn!(
                        namespace = namespace.name(),
                        attempt,
                        code = %code,
                        "Short code claimed concurrently, retrying"
                    );
                }
                result => return result,
            }
        }

        Err(self.exhausted(namespace.name()))
    }

    fn exhausted(&self, namespace: &str) -> AppError {
        tracing::error!(
            namespace,
            attempts = self.max_attempts,
            "Short code allocation exhausted"
        );
        AppError::internal(
            "Failed to generate unique code",
            json!({ "namespace": namespace, "attempts": self.max_attempts }),
        )
    }
}

impl Default for CodeAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SetNamespace {
        taken: Mutex<HashSet<String>>,
        lookups: AtomicUsize,
    }

    impl SetNamespace {
        fn seeded(codes: impl IntoIterator<Item = String>) -> Self {
            Self {
                taken: Mutex::new(codes.into_iter().collect()),
                lookups: AtomicUsize::new(0),
            }
        }

        fn claim(&self, code: &ShortCode) -> Result<(), AppError> {
            if self.taken.lock().unwrap().insert(code.to_string()) {
                Ok(())
            } else {
                Err(AppError::duplicate_code("taken", json!({})))
            }
        }
    }

    #[async_trait]
    impl CodeNamespace for SetNamespace {
        fn name(&self) -> &'static str {
            "test"
        }

        async fn is_taken(&self, code: &ShortCode) -> Result<bool, AppError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.taken.lock().unwrap().contains(code.as_str()))
        }
    }

    fn scripted(codes: &[&str]) -> impl Fn() -> ShortCode + Send + Sync + 'static {
        let queue: Mutex<VecDeque<ShortCode>> = Mutex::new(
            codes
                .iter()
                .map(|c| ShortCode::parse(c).unwrap())
                .collect(),
        );
        move || queue.lock().unwrap().pop_front().unwrap()
    }

    #[tokio::test]
    async fn test_allocations_avoid_seeded_codes() {
        let seeded: Vec<String> = (0..500).map(|_| ShortCode::generate().into_string()).collect();
        let namespace = SetNamespace::seeded(seeded.clone());
        let allocator = CodeAllocator::default();

        let mut allocated = HashSet::new();
        for _ in 0..200 {
            let code = allocator
                .insert_unique(&namespace, |code| {
                    let result = namespace.claim(&code).map(|_| code);
                    async move { result }
                })
                .await
                .unwrap();

            assert!(!seeded.contains(&code.to_string()));
            assert!(allocated.insert(code));
        }

        assert_eq!(allocated.len(), 200);
    }

    #[tokio::test]
    async fn test_allocate_skips_taken_candidates() {
        let namespace = SetNamespace::seeded(["AAAAAA".to_string(), "BBBBBB".to_string()]);
        let allocator =
            CodeAllocator::with_generator(10, scripted(&["AAAAAA", "BBBBBB", "CCCCCC"]));

        let code = allocator.allocate(&namespace).await.unwrap();

        assert_eq!(code.as_str(), "CCCCCC");
        assert_eq!(namespace.lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_allocate_fails_loudly_when_exhausted() {
        let namespace = SetNamespace::seeded(["AAAAAA".to_string()]);
        let allocator = CodeAllocator::with_generator(3, || ShortCode::parse("AAAAAA").unwrap());

        let err = allocator.allocate(&namespace).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(namespace.lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_insert_retries_on_duplicate_code() {
        let namespace = SetNamespace::seeded(Vec::new());
        let allocator = CodeAllocator::with_generator(5, scripted(&["RACE01", "FREE02"]));
        let inserts = AtomicUsize::new(0);

        let code = allocator
            .insert_unique(&namespace, |code| {
                let n = inserts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(AppError::duplicate_code("lost race", json!({})))
                    } else {
                        Ok(code)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(code.as_str(), "FREE02");
        assert_eq!(inserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_insert_propagates_other_errors() {
        let namespace = SetNamespace::seeded(Vec::new());
        let allocator = CodeAllocator::default();
        let inserts = AtomicUsize::new(0);

        let result: Result<ShortCode, AppError> = allocator
            .insert_unique(&namespace, |_| {
                inserts.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::internal("Database error", json!({}))) }
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
        assert_eq!(inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_insert_gives_up_after_max_attempts() {
        let namespace = SetNamespace::seeded(Vec::new());
        let allocator = CodeAllocator::new(4);
        let inserts = AtomicUsize::new(0);

        let result: Result<ShortCode, AppError> = allocator
            .insert_unique(&namespace, |_| {
                inserts.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::duplicate_code("taken", json!({}))) }
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
        assert_eq!(inserts.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_max_attempts_clamped() {
        assert_eq!(CodeAllocator::new(0).max_attempts(), 1);
    }
}
