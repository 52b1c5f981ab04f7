//! Thread-safe recorder for values passed to callbacks.

use std::sync::Arc;

use parking_lot::Mutex;

/// Collects clones of every value handed to its callback.
///
/// Clones share the same buffer, so a test can move one clone into a
/// listener and inspect the other afterwards.
///
/// # Examples
///
/// ```
/// use message_source_test_helpers::Recorder;
///
/// let recorder = Recorder::<String>::new();
/// let callback = recorder.callback();
/// callback(&String::from("reloaded"));
/// assert_eq!(recorder.take(), vec![String::from("reloaded")]);
/// ```
#[derive(Debug)]
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            seen: Arc::clone(&self.seen),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a clone of `value`.
    pub fn record(&self, value: &T) {
        self.seen.lock().push(value.clone());
    }

    /// Callback that records every value it receives.
    #[must_use]
    pub fn callback(&self) -> impl Fn(&T) + Send + Sync + 'static {
        let recorder = self.clone();
        move |value| recorder.record(value)
    }

    /// Number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }

    /// Removes and returns the recorded values.
    #[must_use]
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.seen.lock())
    }
}
