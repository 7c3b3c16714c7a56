//! `SimulationsController`: owns every simulation, dispatches steps to a
//! worker pool and publishes their output.
//!
//! # Lifecycle
//!
//! ```text
//!   Created ──start──▶ Running ◀──start── Paused
//!                         └──────pause──────▶┘
//!   any state ──remove──▶ (gone)
//! ```
//!
//! # Per-simulation serialization
//!
//! Each simulation lives in a [`Slot`] with an `in_flight` flag.  `tick`
//! claims the flag with a compare-exchange before handing the step to the
//! pool and the worker releases it after publishing, through a drop guard
//! so a panicking step cannot leave the simulation stuck.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error, info};

use ares_core::{SimulationId, Tick};

use crate::feed::Feed;
use crate::{EngineConfig, SimError, SimResult, Simulation, Subscription};

/// Where a registered simulation is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulationStatus {
    Created,
    Running,
    Paused,
}

// ── Slot ──────────────────────────────────────────────────────────────────────

struct Slot {
    simulation: Mutex<Simulation>,
    status:     Mutex<SimulationStatus>,
    in_flight:  AtomicBool,
    feed:       Feed,
}

impl Slot {
    fn status(&self) -> MutexGuard<'_, SimulationStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn simulation(&self) -> MutexGuard<'_, Simulation> {
        self.simulation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the right to run the next step.
    fn try_claim(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Releases a slot's in-flight flag when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct SimulationsController {
    slots:               RwLock<HashMap<SimulationId, Arc<Slot>>>,
    pool:                ThreadPool,
    subscriber_capacity: Option<usize>,
    stop_on_finish:      bool,
}

impl SimulationsController {
    pub fn new(config: &EngineConfig) -> SimResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.unwrap_or(0))
            .thread_name(|i| format!("ares-step-{i}"))
            .panic_handler(|_| error!("simulation step panicked on a worker thread"))
            .build()
            .map_err(|e| SimError::Pool(e.to_string()))?;
        Ok(Self {
            slots: RwLock::new(HashMap::new()),
            pool,
            subscriber_capacity: config.subscriber_capacity,
            stop_on_finish: config.stop_on_finish,
        })
    }

    fn slot(&self, id: SimulationId) -> SimResult<Arc<Slot>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(SimError::NotFound(id))
    }

    fn snapshot_slots(&self) -> Vec<(SimulationId, Arc<Slot>)> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<_> = slots.iter().map(|(id, s)| (*id, Arc::clone(s))).collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }

    // ── Registry ──────────────────────────────────────────────────────────

    /// Register `simulation` under `id` in the `Created` state.
    pub fn add_simulation(&self, id: SimulationId, simulation: Simulation) -> SimResult<()> {
        if simulation.id() != id {
            return Err(SimError::IllegalState(format!(
                "simulation {} registered under {id}",
                simulation.id()
            )));
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots.contains_key(&id) {
            return Err(SimError::DuplicateId(id));
        }
        slots.insert(
            id,
            Arc::new(Slot {
                simulation: Mutex::new(simulation),
                status:     Mutex::new(SimulationStatus::Created),
                in_flight:  AtomicBool::new(false),
                feed:       Feed::new(id, self.subscriber_capacity),
            }),
        );
        info!(sim = %id, "simulation added");
        Ok(())
    }

    /// Deregister `id`.  A step already in flight completes, but its output
    /// is never delivered; every subscriber is disconnected.
    pub fn remove_simulation(&self, id: SimulationId) -> SimResult<()> {
        let slot = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(SimError::NotFound(id))?;
        slot.feed.close();
        info!(sim = %id, "simulation removed");
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// `Created`/`Paused` → `Running`.  Starting a running simulation is a
    /// no-op.
    pub fn start_simulation(&self, id: SimulationId) -> SimResult<()> {
        let slot = self.slot(id)?;
        let mut status = slot.status();
        let from = *status;
        if from != SimulationStatus::Running {
            *status = SimulationStatus::Running;
            debug!(sim = %id, ?from, "simulation running");
        }
        Ok(())
    }

    /// `Running` → `Paused`.  Pausing a simulation that is not running is
    /// an `IllegalState` error.
    pub fn pause_simulation(&self, id: SimulationId) -> SimResult<()> {
        let slot = self.slot(id)?;
        let mut status = slot.status();
        match *status {
            SimulationStatus::Running => {
                *status = SimulationStatus::Paused;
                debug!(sim = %id, "simulation paused");
                Ok(())
            }
            other => Err(SimError::IllegalState(format!("cannot pause {id}: it is {other:?}"))),
        }
    }

    pub fn status(&self, id: SimulationId) -> SimResult<SimulationStatus> {
        Ok(*self.slot(id)?.status())
    }

    /// Every registered simulation, ascending.
    pub fn simulations(&self) -> Vec<SimulationId> {
        self.snapshot_slots().into_iter().map(|(id, _)| id).collect()
    }

    /// Registered simulations currently `Running`, ascending.
    pub fn running_simulations(&self) -> Vec<SimulationId> {
        self.snapshot_slots()
            .into_iter()
            .filter(|(_, s)| *s.status() == SimulationStatus::Running)
            .map(|(id, _)| id)
            .collect()
    }

    /// Tick count and finished flag of `id`.  Waits for a step in flight.
    pub fn progress(&self, id: SimulationId) -> SimResult<(Tick, bool)> {
        let slot = self.slot(id)?;
        let sim = slot.simulation();
        Ok((sim.tick(), sim.is_finished()))
    }

    // ── Streaming ─────────────────────────────────────────────────────────

    /// Open a new subscriber queue on `id`.
    pub fn subscribe(&self, id: SimulationId) -> SimResult<Subscription> {
        self.slot(id)?.feed.subscribe().ok_or(SimError::NotFound(id))
    }

    pub fn subscriber_count(&self, id: SimulationId) -> SimResult<usize> {
        Ok(self.slot(id)?.feed.subscriber_count())
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Claim every `Running` simulation without a step in flight.
    fn claim_ready(&self) -> Vec<(SimulationId, Arc<Slot>)> {
        self.snapshot_slots()
            .into_iter()
            .filter(|(_, s)| *s.status() == SimulationStatus::Running && s.try_claim())
            .collect()
    }

    /// Dispatch one step of every ready simulation to the worker pool and
    /// return their ids without waiting.  Output is published as each step
    /// completes.
    pub fn tick(&self) -> Vec<SimulationId> {
        let ready = self.claim_ready();
        let ids = ready.iter().map(|(id, _)| *id).collect();
        for (_, slot) in ready {
            let stop_on_finish = self.stop_on_finish;
            self.pool.spawn(move || advance(&slot, stop_on_finish));
        }
        ids
    }

    /// Like [`tick`](Self::tick), but returns only after every dispatched
    /// step was published.
    pub fn tick_blocking(&self) -> Vec<SimulationId> {
        let ready = self.claim_ready();
        let ids = ready.iter().map(|(id, _)| *id).collect();
        let stop_on_finish = self.stop_on_finish;
        self.pool.scope(|scope| {
            for (_, slot) in &ready {
                scope.spawn(move |_| advance(slot, stop_on_finish));
            }
        });
        ids
    }
}

/// Run one claimed step and publish it.  Releases the claim on exit.
fn advance(slot: &Slot, stop_on_finish: bool) {
    let _release = InFlightGuard(&slot.in_flight);

    let stepped = {
        let mut sim = slot.simulation();
        catch_unwind(AssertUnwindSafe(|| sim.step()))
    };
    let output = match stepped {
        Ok(output) => output,
        Err(_) => {
            error!("simulation step panicked; output skipped");
            return;
        }
    };

    if output.finished && stop_on_finish {
        let mut status = slot.status();
        if *status == SimulationStatus::Running {
            *status = SimulationStatus::Paused;
            info!(sim = %output.simulation_id, tick = %output.tick, "simulation finished");
        }
    }
    slot.feed.publish(output);
}
