//! The three bodies of the scene and their fixed parameters.

use glam::Vec3;

use crate::angles::{
    EARTH_ORBIT_DAYS, EARTH_ROTATION_DAYS, MOON_ORBIT_DAYS, MOON_ROTATION_DAYS, SUN_ROTATION_DAYS,
    rotation_angle,
};

/// Which body a [`CelestialBody`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Sun,
    Earth,
    Moon,
}

impl BodyKind {
    /// All kinds, in draw order.
    pub const ALL: [BodyKind; 3] = [BodyKind::Sun, BodyKind::Earth, BodyKind::Moon];

    /// Lowercase label used for GPU resource names and logs.
    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Sun => "sun",
            BodyKind::Earth => "earth",
            BodyKind::Moon => "moon",
        }
    }
}

/// Immutable parameters of one body, fixed at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub kind: BodyKind,
    pub name: &'static str,
    /// Half the cube edge length.
    pub half_extent: f32,
    /// Flat linear RGB color.
    pub color: Vec3,
    /// Days per turn about its own axis.
    pub rotation_period_days: f64,
    /// Days per revolution around its parent; 0 for the Sun.
    pub orbit_period_days: f64,
    /// Distance from the parent's center.
    pub orbit_radius: f32,
    /// Angle between spin axis and orbital normal, in degrees.
    pub axial_tilt_degrees: f32,
}

impl CelestialBody {
    /// Cube edge length, as passed to the geometry generator.
    pub fn size(&self) -> f32 {
        self.half_extent * 2.0
    }

    /// Self-rotation angle in degrees after `day` days.
    pub fn self_rotation(&self, day: f64) -> f64 {
        rotation_angle(self.rotation_period_days, day)
    }

    /// Orbit angle in degrees after `day` days.
    pub fn orbit_angle(&self, day: f64) -> f64 {
        rotation_angle(self.orbit_period_days, day)
    }

    pub fn sun() -> Self {
        Self {
            kind: BodyKind::Sun,
            name: "Sun",
            half_extent: 10.0,
            color: Vec3::new(1.0, 1.0, 0.0),
            rotation_period_days: SUN_ROTATION_DAYS,
            orbit_period_days: 0.0,
            orbit_radius: 0.0,
            axial_tilt_degrees: 0.0,
        }
    }

    pub fn earth() -> Self {
        Self {
            kind: BodyKind::Earth,
            name: "Earth",
            half_extent: 4.0,
            color: Vec3::new(0.0, 0.0, 1.0),
            rotation_period_days: EARTH_ROTATION_DAYS,
            orbit_period_days: EARTH_ORBIT_DAYS,
            orbit_radius: 24.0,
            axial_tilt_degrees: 23.4,
        }
    }

    pub fn moon() -> Self {
        Self {
            kind: BodyKind::Moon,
            name: "Moon",
            half_extent: 2.0,
            color: Vec3::new(0.5, 0.5, 0.5),
            rotation_period_days: MOON_ROTATION_DAYS,
            orbit_period_days: MOON_ORBIT_DAYS,
            orbit_radius: 10.0,
            axial_tilt_degrees: 0.0,
        }
    }
}

/// The Sun, the Earth orbiting it and the Moon orbiting the Earth.
#[derive(Clone, Debug, PartialEq)]
pub struct SolarSystem {
    pub sun: CelestialBody,
    pub earth: CelestialBody,
    pub moon: CelestialBody,
}

impl SolarSystem {
    /// Look a body up by kind.
    pub fn body(&self, kind: BodyKind) -> &CelestialBody {
        match kind {
            BodyKind::Sun => &self.sun,
            BodyKind::Earth => &self.earth,
            BodyKind::Moon => &self.moon,
        }
    }

    /// All three bodies in draw order.
    pub fn bodies(&self) -> [&CelestialBody; 3] {
        [&self.sun, &self.earth, &self.moon]
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self {
            sun: CelestialBody::sun(),
            earth: CelestialBody::earth(),
            moon: CelestialBody::moon(),
        }
    }
}
