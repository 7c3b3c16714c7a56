//! `Ares`: the engine context an application constructs and owns.
//!
//! It bundles the model registry, configuration sessions, the controller
//! and the ticker.  Typical flow:
//!
//! ```rust,ignore
//! let ares = Ares::new(EngineConfig::default())?;
//! let cfg = ares.select_model("Schelling")?;
//! ares.set_model_parameter(cfg, "size", 20)?;
//! ares.set_model_parameter(cfg, "numberOfAgentsTypeA", 150)?;
//! ares.set_model_parameter(cfg, "numberOfAgentsTypeB", 150)?;
//! let sim = ares.start_simulation(cfg)?;
//! let feed = ares.subscribe(sim)?;
//! ares.start_ticker()?;
//! for frame in feed.iter().take(100) { /* render */ }
//! ares.shutdown();
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use ares_core::{ConfigId, SimulationId};
use ares_model::{Model, ModelRegistry};
use ares_params::{ParamValue, Parameters};

use crate::{
    EngineConfig, SimError, SimResult, Simulation, SimulationStatus, SimulationsController,
    Subscription, Ticker,
};

pub struct Ares {
    config:          EngineConfig,
    registry:        ModelRegistry,
    sessions:        Mutex<HashMap<ConfigId, Model>>,
    next_config:     AtomicU32,
    next_simulation: AtomicU32,
    controller:      Arc<SimulationsController>,
    ticker:          Mutex<Option<Ticker>>,
}

impl Ares {
    /// An engine offering the built-in models.
    pub fn new(config: EngineConfig) -> SimResult<Self> {
        Self::with_registry(config, ModelRegistry::builtin())
    }

    pub fn with_registry(config: EngineConfig, registry: ModelRegistry) -> SimResult<Self> {
        let controller = Arc::new(SimulationsController::new(&config)?);
        Ok(Self {
            config,
            registry,
            sessions: Mutex::new(HashMap::new()),
            next_config: AtomicU32::new(0),
            next_simulation: AtomicU32::new(0),
            controller,
            ticker: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn controller(&self) -> &Arc<SimulationsController> {
        &self.controller
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<ConfigId, Model>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the model of session `cfg`.
    fn with_session<T>(
        &self,
        cfg: ConfigId,
        f:   impl FnOnce(&mut Model) -> SimResult<T>,
    ) -> SimResult<T> {
        let mut sessions = self.sessions();
        let model = sessions.get_mut(&cfg).ok_or(SimError::UnknownConfig(cfg))?;
        f(model)
    }

    // ── Registry ──────────────────────────────────────────────────────────

    pub fn list_models(&self) -> Vec<String> {
        self.registry.names().map(str::to_owned).collect()
    }

    /// Open a configuration session on a fresh instance of model `name`.
    pub fn select_model(&self, name: &str) -> SimResult<ConfigId> {
        let model = self.registry.create(name)?;
        let cfg = ConfigId(self.next_config.fetch_add(1, Ordering::Relaxed));
        self.sessions().insert(cfg, model);
        info!(%cfg, model = name, "configuration session opened");
        Ok(cfg)
    }

    /// Close a session.  Simulations already started from it keep running.
    pub fn discard_config(&self, cfg: ConfigId) -> SimResult<()> {
        self.sessions()
            .remove(&cfg)
            .map(|_| ())
            .ok_or(SimError::UnknownConfig(cfg))
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// A copy of the session model's parameters.
    pub fn model_parameters(&self, cfg: ConfigId) -> SimResult<Parameters> {
        self.with_session(cfg, |m| Ok(m.parameters().clone()))
    }

    pub fn set_model_parameter(
        &self,
        cfg:   ConfigId,
        key:   &str,
        value: impl Into<ParamValue>,
    ) -> SimResult<()> {
        self.with_session(cfg, |m| Ok(m.parameters_mut().configure(key, value)?))
    }

    pub fn set_model_parameter_str(&self, cfg: ConfigId, key: &str, raw: &str) -> SimResult<()> {
        self.with_session(cfg, |m| Ok(m.parameters_mut().configure_from_str(key, raw)?))
    }

    /// Agent template names of the session model.
    pub fn list_agents(&self, cfg: ConfigId) -> SimResult<Vec<String>> {
        self.with_session(cfg, |m| Ok(m.templates().names().map(str::to_owned).collect()))
    }

    /// A copy of one agent template's parameters.
    pub fn agent_parameters(&self, cfg: ConfigId, agent: &str) -> SimResult<Parameters> {
        self.with_session(cfg, |m| Ok(m.templates().get(agent)?.parameters().clone()))
    }

    /// Configure one agent template parameter.  Keys the behavior writes
    /// itself (`Access::Observed`) are rejected with `ReadOnly`.
    pub fn set_agent_parameter(
        &self,
        cfg:   ConfigId,
        agent: &str,
        key:   &str,
        value: impl Into<ParamValue>,
    ) -> SimResult<()> {
        self.with_session(cfg, |m| {
            let template = m.templates_mut().get_mut(agent)?;
            Ok(template.parameters_mut().configure(key, value)?)
        })
    }

    pub fn set_agent_parameter_str(
        &self,
        cfg:   ConfigId,
        agent: &str,
        key:   &str,
        raw:   &str,
    ) -> SimResult<()> {
        self.with_session(cfg, |m| {
            let template = m.templates_mut().get_mut(agent)?;
            Ok(template.parameters_mut().configure_from_str(key, raw)?)
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Build a simulation from session `cfg` and start it.
    ///
    /// The simulation gets its own copy of the configured model; the session
    /// stays open and can start further simulations.  Fails with
    /// `NotRunnable` while required parameters are unset.
    pub fn start_simulation(&self, cfg: ConfigId) -> SimResult<SimulationId> {
        let model = self.with_session(cfg, |m| Ok(m.clone()))?;
        let id = SimulationId(self.next_simulation.fetch_add(1, Ordering::Relaxed));
        let simulation = Simulation::new(id, model, self.config.seed)?;
        self.controller.add_simulation(id, simulation)?;
        self.controller.start_simulation(id)?;
        info!(sim = %id, %cfg, "simulation started");
        Ok(id)
    }

    pub fn pause_simulation(&self, id: SimulationId) -> SimResult<()> {
        self.controller.pause_simulation(id)
    }

    pub fn resume_simulation(&self, id: SimulationId) -> SimResult<()> {
        self.controller.start_simulation(id)
    }

    pub fn remove_simulation(&self, id: SimulationId) -> SimResult<()> {
        self.controller.remove_simulation(id)
    }

    pub fn running_simulations(&self) -> Vec<SimulationId> {
        self.controller.running_simulations()
    }

    pub fn status(&self, id: SimulationId) -> SimResult<SimulationStatus> {
        self.controller.status(id)
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Start the periodic ticker.  `IllegalState` if it is already running.
    pub fn start_ticker(&self) -> SimResult<()> {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if ticker.is_some() {
            return Err(SimError::IllegalState("ticker already running".into()));
        }
        let controller = Arc::clone(&self.controller);
        *ticker = Some(Ticker::start(self.config.tick_interval(), move || {
            controller.tick();
        })?);
        info!(interval_ms = self.config.tick_interval_ms, "ticker started");
        Ok(())
    }

    /// Stop the ticker if it is running.  Returns whether it was.
    pub fn stop_ticker(&self) -> bool {
        let ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner).take();
        match ticker {
            Some(t) => {
                t.stop();
                info!("ticker stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Advance every running simulation by one step and wait for the
    /// results to be published.
    pub fn tick_once(&self) -> Vec<SimulationId> {
        self.controller.tick_blocking()
    }

    // ── Streaming ─────────────────────────────────────────────────────────

    pub fn subscribe(&self, id: SimulationId) -> SimResult<Subscription> {
        self.controller.subscribe(id)
    }

    /// Stop the ticker, remove every simulation and close every session.
    pub fn shutdown(&self) {
        self.stop_ticker();
        for id in self.controller.simulations() {
            // Concurrent removal is the only way this fails.
            let _ = self.controller.remove_simulation(id);
        }
        self.sessions().clear();
    }
}

impl Drop for Ares {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
