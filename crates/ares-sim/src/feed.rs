//! Per-simulation broadcast to independent subscriber queues.
//!
//! Each subscriber owns one `crossbeam-channel` queue.  Publishing never
//! blocks: a full bounded queue loses that frame for that subscriber only,
//! and a queue whose receiver was dropped is pruned.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossbeam_channel::{
    Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError, TrySendError, bounded, unbounded,
};
use tracing::{trace, warn};

use ares_core::SimulationId;

use crate::SimulationOutputData;

// ── Subscription ──────────────────────────────────────────────────────────────

/// The receiving end of one subscriber queue.
///
/// Frames arrive in tick order.  Once the simulation is removed the queue
/// disconnects: `recv` drains what is left, then fails.  Dropping the
/// subscription unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    simulation_id: SimulationId,
    receiver:      Receiver<SimulationOutputData>,
}

impl Subscription {
    pub fn simulation_id(&self) -> SimulationId {
        self.simulation_id
    }

    /// Block until the next frame, or fail once disconnected and drained.
    pub fn recv(&self) -> Result<SimulationOutputData, RecvError> {
        self.receiver.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<SimulationOutputData, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Result<SimulationOutputData, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Frames already queued, without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = SimulationOutputData> + '_ {
        self.receiver.try_iter()
    }

    /// Blocking iterator that ends when the simulation is removed.
    pub fn iter(&self) -> impl Iterator<Item = SimulationOutputData> + '_ {
        self.receiver.iter()
    }

    /// The underlying receiver, for use with `crossbeam_channel::select!`.
    pub fn receiver(&self) -> &Receiver<SimulationOutputData> {
        &self.receiver
    }
}

// ── Feed ──────────────────────────────────────────────────────────────────────

struct FeedInner {
    closed:      bool,
    subscribers: Vec<Sender<SimulationOutputData>>,
}

/// The subscriber registry of one simulation.
pub(crate) struct Feed {
    simulation_id: SimulationId,
    capacity:      Option<usize>,
    inner:         Mutex<FeedInner>,
}

impl Feed {
    pub(crate) fn new(simulation_id: SimulationId, capacity: Option<usize>) -> Self {
        Self {
            simulation_id,
            capacity,
            inner: Mutex::new(FeedInner { closed: false, subscribers: Vec::new() }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new subscriber.  `None` once the feed is closed.
    pub(crate) fn subscribe(&self) -> Option<Subscription> {
        let mut inner = self.lock();
        if inner.closed {
            return None;
        }
        let (tx, rx) = match self.capacity {
            Some(cap) => bounded(cap.max(1)),
            None => unbounded(),
        };
        inner.subscribers.push(tx);
        Some(Subscription { simulation_id: self.simulation_id, receiver: rx })
    }

    /// Offer `data` to every subscriber.  Returns how many accepted it.
    ///
    /// Checked under the lock that [`close`](Self::close) takes, so nothing
    /// is delivered after the feed was closed.
    pub(crate) fn publish(&self, data: SimulationOutputData) -> usize {
        let mut inner = self.lock();
        if inner.closed {
            trace!(sim = %self.simulation_id, tick = %data.tick, "output discarded after removal");
            return 0;
        }
        let mut delivered = 0;
        inner.subscribers.retain(|tx| match tx.try_send(data.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                warn!(sim = %self.simulation_id, tick = %data.tick, "subscriber queue full, frame dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!(sim = %self.simulation_id, "subscriber gone");
                false
            }
        });
        delivered
    }

    /// Close the feed and drop every sender, disconnecting subscribers.
    pub(crate) fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.subscribers.clear();
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}
