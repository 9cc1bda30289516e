//! Simulated-day clock, body definitions and the orbital transform model for
//! the Sun-Earth-Moon system.

pub mod angles;
pub mod body;
pub mod clock;
pub mod transform;

pub use angles::{
    OrbitalAngles, earth_orbit, earth_self_rotation, moon_orbit, moon_self_rotation,
    rotation_angle, sun_self_rotation,
};
pub use body::{BodyKind, CelestialBody, SolarSystem};
pub use clock::{DEFAULT_DAY_STEP, SimulationClock};
pub use transform::{SystemTransforms, earth_model, moon_model, sun_model};
