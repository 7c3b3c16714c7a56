//! Engine configuration.

use std::time::Duration;

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application and passed to
/// [`Ares::new`](crate::Ares::new).  Every field has a default, so a partial
/// file is enough.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Milliseconds between two ticker firings.  Default: 50.
    pub tick_interval_ms: u64,

    /// Worker thread count for the step pool.  `None` uses all logical cores.
    pub worker_threads: Option<usize>,

    /// Per-subscriber queue capacity.  A full queue drops the newest frame
    /// for that subscriber only.  `None` means unbounded.
    pub subscriber_capacity: Option<usize>,

    /// Pause a simulation as soon as its model reports it finished.
    /// When `false` finished simulations keep ticking and keep reporting
    /// `finished: true`.
    pub stop_on_finish: bool,

    /// Master RNG seed.  Each simulation derives its own stream from it.
    pub seed: u64,
}

impl EngineConfig {
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
    pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 256;

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:    Self::DEFAULT_TICK_INTERVAL_MS,
            worker_threads:      None,
            subscriber_capacity: Some(Self::DEFAULT_SUBSCRIBER_CAPACITY),
            stop_on_finish:      false,
            seed:                0,
        }
    }
}
