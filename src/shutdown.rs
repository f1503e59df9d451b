//! Interruptible waiting between daemon rotations.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::error::DaemonError;

/// Result of waiting on the shutdown signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full interval elapsed
    TimedOut,
    /// A stop was requested
    Stop,
}

/// Receives stop requests from a signal handler or another thread
#[derive(Debug)]
pub struct Shutdown {
    rx: Receiver<()>,
}

impl Shutdown {
    /// Create a shutdown signal and the sender that triggers it
    pub fn channel() -> (Sender<()>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// Trigger shutdown on SIGINT/SIGTERM. Can only be installed once per process.
    pub fn install() -> Result<Self, DaemonError> {
        let (tx, shutdown) = Self::channel();
        ctrlc::set_handler(move || {
            // Receiver gone means the daemon already exited
            let _ = tx.send(());
        })?;
        Ok(shutdown)
    }

    /// Block for up to `timeout`, returning early on a stop request.
    /// A stop requested while no one was waiting is seen on the next call.
    pub fn wait(&self, timeout: Duration) -> Result<WaitOutcome, DaemonError> {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => Ok(WaitOutcome::Stop),
            Err(RecvTimeoutError::Timeout) => Ok(WaitOutcome::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Err(DaemonError::ShutdownChannelClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_wait_times_out() {
        let (_tx, shutdown) = Shutdown::channel();
        let outcome = shutdown.wait(Duration::from_millis(20)).unwrap();
        assert_eq!(outcome, WaitOutcome::TimedOut);
    }

    #[test]
    fn test_wait_sees_pending_stop() {
        let (tx, shutdown) = Shutdown::channel();
        tx.send(()).unwrap();

        let start = Instant::now();
        let outcome = shutdown.wait(Duration::from_secs(30)).unwrap();

        assert_eq!(outcome, WaitOutcome::Stop);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_wait_interrupted_from_other_thread() {
        let (tx, shutdown) = Shutdown::channel();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            tx.send(()).unwrap();
        });

        let outcome = shutdown.wait(Duration::from_secs(30)).unwrap();

        assert_eq!(outcome, WaitOutcome::Stop);
        handle.join().unwrap();
    }

    #[test]
    fn test_wait_disconnected_is_error() {
        let (tx, shutdown) = Shutdown::channel();
        drop(tx);

        let result = shutdown.wait(Duration::from_secs(1));

        assert!(matches!(result, Err(DaemonError::ShutdownChannelClosed)));
    }
}
