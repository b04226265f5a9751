//! Ctrl+C handling for headless commands.
//!
//! `submit --background` keeps polling until the run finishes. A SIGINT sets
//! a flag that the polling loop checks between requests, so the run is
//! abandoned locally (it keeps going on the server).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{DashError, Result};

/// Shared flag set when SIGINT is received.
#[derive(Clone)]
pub struct SignalHandler {
    shutdown_flag: Arc<AtomicBool>,
}

impl SignalHandler {
    /// Registers the SIGINT handler.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler is already registered for this process.
    pub fn new() -> Result<Self> {
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let flag_clone = Arc::clone(&shutdown_flag);

        ctrlc::set_handler(move || {
            flag_clone.store(true, Ordering::SeqCst);
        })
        .map_err(|e| DashError::SignalHandler(e.to_string()))?;

        Ok(Self { shutdown_flag })
    }

    /// Returns `true` once SIGINT has been received (non-blocking).
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self {
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    #[cfg(test)]
    pub(crate) fn trigger(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
    }
}
