//! Revalidating content snapshot.
//!
//! The server holds one immutable copy of the content and swaps in a fresh
//! one once the current copy is older than the configured lifetime. Readers
//! always get an `Arc` to a complete snapshot, never a half-loaded one.
//!
//! A failed reload keeps serving the previous snapshot.

use super::SourceError;
use crate::log;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

type Loader<S> = Box<dyn Fn() -> Result<S, SourceError> + Send + Sync>;

struct Cached<S> {
    source: Arc<S>,
    loaded_at: Instant,
}

/// Content snapshot with a maximum age.
pub struct Snapshot<S> {
    load: Loader<S>,
    max_age: Duration,
    current: RwLock<Cached<S>>,
}

impl<S> Snapshot<S> {
    /// Load the first snapshot. Failing here is fatal for the caller.
    pub fn new<F>(max_age: Duration, load: F) -> Result<Self, SourceError>
    where
        F: Fn() -> Result<S, SourceError> + Send + Sync + 'static,
    {
        let source = load()?;
        Ok(Self {
            load: Box::new(load),
            max_age,
            current: RwLock::new(Cached {
                source: Arc::new(source),
                loaded_at: Instant::now(),
            }),
        })
    }

    /// Current snapshot, reloading first if it has expired.
    pub fn get(&self) -> Arc<S> {
        {
            let cached = self.current.read();
            if cached.loaded_at.elapsed() < self.max_age {
                return Arc::clone(&cached.source);
            }
        }

        let mut cached = self.current.write();
        // another request may have reloaded while we waited
        if cached.loaded_at.elapsed() < self.max_age {
            return Arc::clone(&cached.source);
        }

        match (self.load)() {
            Ok(source) => {
                cached.source = Arc::new(source);
                log!("content"; "snapshot revalidated");
            }
            Err(err) => log!("error"; "revalidation failed, keeping previous content: {err}"),
        }
        // retry after another full lifetime either way
        cached.loaded_at = Instant::now();
        Arc::clone(&cached.source)
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> impl Fn() -> Result<usize, SourceError> + Send + Sync + 'static {
        let counter = Arc::clone(counter);
        move || Ok(counter.fetch_add(1, Ordering::SeqCst))
    }

    #[test]
    fn test_fresh_snapshot_is_reused() {
        let counter = Arc::new(AtomicUsize::new(0));
        let snapshot = Snapshot::new(Duration::from_secs(300), counting(&counter)).unwrap();

        assert_eq!(*snapshot.get(), 0);
        assert_eq!(*snapshot.get(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_expired_snapshot_reloads() {
        let counter = Arc::new(AtomicUsize::new(0));
        let snapshot = Snapshot::new(Duration::ZERO, counting(&counter)).unwrap();

        assert_eq!(*snapshot.get(), 1);
        assert_eq!(*snapshot.get(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let counter = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&counter);
        let snapshot = Snapshot::new(Duration::ZERO, move || {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok("first")
            } else {
                Err(SourceError::UnknownCursor("boom".into()))
            }
        })
        .unwrap();

        assert_eq!(*snapshot.get(), "first");
        assert_eq!(*snapshot.get(), "first");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_initial_load_failure() {
        let result = Snapshot::<()>::new(Duration::ZERO, || Err(SourceError::MissingDir("content".into())));
        assert!(result.is_err());
    }
}
