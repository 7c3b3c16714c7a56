//! `Ticker`: a background thread firing a callback at a fixed period.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, bounded, select, tick};
use tracing::{debug, error};

use crate::SimResult;

/// Fires `on_tick` every `period` until stopped.
///
/// The period is wall-clock and independent of how long `on_tick` takes:
/// missed firings are coalesced, never queued up.  The ticker owns no
/// simulation state.  Dropping it stops the thread and waits for it.
pub struct Ticker {
    period: Duration,
    stop:   Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start(period: Duration, mut on_tick: impl FnMut() + Send + 'static) -> SimResult<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("ares-ticker".into())
            .spawn(move || {
                let ticks = tick(period);
                loop {
                    select! {
                        recv(ticks) -> _ => on_tick(),
                        recv(stop_rx) -> _ => break,
                    }
                }
                debug!("ticker stopped");
            })?;
        debug!(?period, "ticker started");
        Ok(Self { period, stop: Some(stop_tx), handle: Some(handle) })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop firing and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the stop channel, which also ends
        // the loop.
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
