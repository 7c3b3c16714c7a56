//! Type labels and parameter keys.
//!
//! Behaviors match on these strings, so they are the contract between
//! factories, models and anything reading snapshots.

pub const PREDATOR: &str = "Predator";
pub const PREY: &str = "Prey";
pub const FIRE: &str = "Fire";
pub const TREE: &str = "Tree";
pub const BURNT: &str = "Burnt";

pub const VISION_RADIUS_PREDATOR: &str = "visionRadiusPredator";
pub const VISION_RADIUS_PREY: &str = "visionRadiusPrey";

pub const THRESHOLD: &str = "threshold";
pub const VISION_RADIUS: &str = "visionRadius";
pub const RATIO: &str = "ratio";

pub const RADIUS: &str = "radius";
pub const DIRECTION: &str = "direction";
pub const ANGLE: &str = "angle";
pub const FUEL: &str = "fuel";
pub const BURN_RATE: &str = "burnRate";
pub const FLAMMABILITY: &str = "flammability";
