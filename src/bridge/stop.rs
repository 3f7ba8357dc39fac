//! Stop request shared between the audio callback and the owning thread.

use crate::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct StopState {
    /// Read lock-free by the audio thread
    stopped: AtomicBool,
    /// Mirrors `stopped` for threads that block on `condvar`
    lock: Mutex<bool>,
    condvar: Condvar,
    /// First failure that ended the stream, if any
    failure: Mutex<Option<Error>>,
}

/// A cloneable stop flag.
///
/// The audio thread only ever reads the atomic flag. Threads that want to
/// sleep until playback ends block on the condition variable instead of
/// spinning.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tonestream::StopSignal;
///
/// let stop = StopSignal::new();
/// let remote = stop.clone();
/// std::thread::spawn(move || remote.request_stop());
///
/// stop.wait();
/// assert!(stop.is_stopped());
/// assert!(stop.wait_timeout(Duration::from_millis(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<StopState>,
}

impl StopSignal {
    /// Creates a signal in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the stream to stop and wakes every waiting thread.
    ///
    /// Calling this more than once has no further effect.
    pub fn request_stop(&self) {
        if self.inner.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut stopped = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        self.inner.condvar.notify_all();
    }

    /// Records `error` as the reason the stream ended, then requests a stop.
    ///
    /// Only the first failure is kept. Called from the device's error
    /// callback, never from the audio data callback.
    pub fn fail(&self, error: Error) {
        {
            let mut failure = self
                .inner
                .failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if failure.is_none() {
                *failure = Some(error);
            }
        }
        self.request_stop();
    }

    /// Takes the recorded failure, leaving none behind.
    pub fn take_failure(&self) -> Option<Error> {
        self.inner
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Returns true once a stop has been requested. Never blocks.
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire)
    }

    /// Blocks the calling thread until a stop is requested.
    pub fn wait(&self) {
        let mut stopped = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while !*stopped {
            stopped = self
                .inner
                .condvar
                .wait(stopped)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until a stop is requested or `timeout` elapses.
    ///
    /// Returns true if the stop was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let stopped = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (stopped, _) = self
            .inner
            .condvar
            .wait_timeout_while(stopped, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_starts_running() {
        let stop = StopSignal::new();
        assert!(!stop.is_stopped());
        assert!(!stop.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn test_request_stop_is_shared() {
        let stop = StopSignal::new();
        let clone = stop.clone();
        clone.request_stop();
        clone.request_stop();
        assert!(stop.is_stopped());
    }

    #[test]
    fn test_plain_stop_has_no_failure() {
        let stop = StopSignal::new();
        stop.request_stop();
        assert!(stop.take_failure().is_none());
    }

    #[test]
    fn test_failure_stops_and_is_reported_once() {
        let stop = StopSignal::new();
        let remote = stop.clone();
        thread::spawn(move || {
            remote.fail(Error::device("stream invalidated"));
            remote.fail(Error::device("second failure"));
        })
        .join()
        .unwrap();

        stop.wait();
        assert!(stop.is_stopped());
        let failure = stop.take_failure().unwrap();
        assert!(failure.is_device_error());
        assert_eq!(failure.to_string(), "device error: stream invalidated");
        assert!(stop.take_failure().is_none());
    }

    #[test]
    fn test_wait_wakes_on_stop() {
        let stop = StopSignal::new();
        let remote = stop.clone();
        let start = Instant::now();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.request_stop();
        });
        assert!(stop.wait_timeout(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(10));
        handle.join().unwrap();
    }
}
