//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer value.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identity of one agent instance.  Two agents built from the same
    /// factory never share an id.
    pub struct AgentId(u64);
}

typed_id! {
    /// Identity of a running simulation inside a controller.
    pub struct SimulationId(u32);
}

typed_id! {
    /// Identity of a configuration session (a model selected but not yet run).
    pub struct ConfigId(u32);
}

static NEXT_AGENT_ID: AtomicU64 = AtomicU64::new(0);

impl AgentId {
    /// Allocate a fresh, process-unique agent id.
    pub fn next() -> AgentId {
        AgentId(NEXT_AGENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}
