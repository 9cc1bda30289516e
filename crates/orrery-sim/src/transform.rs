//! Per-body model matrices.
//!
//! Each matrix starts at identity and post-multiplies one operation at a time,
//! so the last listed operation is applied to the vertices first.

use glam::{Mat4, Vec3};

use crate::angles::to_radians_f32;
use crate::body::{BodyKind, CelestialBody, SolarSystem};

/// The Sun spins in place at the origin.
pub fn sun_model(sun: &CelestialBody, day: f64) -> Mat4 {
    Mat4::from_rotation_y(to_radians_f32(sun.self_rotation(day)))
}

/// Orbit, push out to the orbit radius, then spin about a tilted axis.
///
/// The spin is undone, the tilt applied about the orbit-local depth axis, and
/// the spin re-applied. The operation order is load-bearing: the pole stays
/// `axial_tilt_degrees` away from the orbital normal at every instant.
pub fn earth_model(earth: &CelestialBody, day: f64) -> Mat4 {
    let spin = to_radians_f32(earth.self_rotation(day));
    let tilt = (-earth.axial_tilt_degrees).to_radians();

    Mat4::from_rotation_y(to_radians_f32(earth.orbit_angle(day)))
        * Mat4::from_translation(Vec3::new(earth.orbit_radius, 0.0, 0.0))
        * Mat4::from_rotation_y(-spin)
        * Mat4::from_rotation_z(tilt)
        * Mat4::from_rotation_y(spin)
}

/// The Moon orbits its parent's fully composed frame, tilt included.
pub fn moon_model(parent: Mat4, moon: &CelestialBody, day: f64) -> Mat4 {
    parent
        * Mat4::from_rotation_y(to_radians_f32(moon.orbit_angle(day)))
        * Mat4::from_translation(Vec3::new(moon.orbit_radius, 0.0, 0.0))
        * Mat4::from_rotation_y(to_radians_f32(moon.self_rotation(day)))
}

/// Model matrices for all three bodies at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SystemTransforms {
    pub sun: Mat4,
    pub earth: Mat4,
    pub moon: Mat4,
}

impl SystemTransforms {
    /// Compute every body's model matrix for `day`.
    pub fn compute(system: &SolarSystem, day: f64) -> Self {
        let earth = earth_model(&system.earth, day);
        Self {
            sun: sun_model(&system.sun, day),
            earth,
            moon: moon_model(earth, &system.moon, day),
        }
    }

    /// The model matrix of `kind`.
    pub fn get(&self, kind: BodyKind) -> Mat4 {
        match kind {
            BodyKind::Sun => self.sun,
            BodyKind::Earth => self.earth,
            BodyKind::Moon => self.moon,
        }
    }

    /// World-space center of `kind`.
    pub fn position(&self, kind: BodyKind) -> Vec3 {
        self.get(kind).w_axis.truncate()
    }
}
