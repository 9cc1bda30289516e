//! Rotation and orbit angles as pure functions of simulated days.
//!
//! All angles are in degrees and unbounded; they grow linearly with time and
//! repeat modulo 360 once per period.

/// Sun self-rotation period in days.
pub const SUN_ROTATION_DAYS: f64 = 27.0;
/// Earth self-rotation period in days.
pub const EARTH_ROTATION_DAYS: f64 = 1.0;
/// Earth orbital period around the Sun in days.
pub const EARTH_ORBIT_DAYS: f64 = 365.0;
/// Moon orbital period around the Earth in days.
pub const MOON_ORBIT_DAYS: f64 = 27.0;
/// Moon self-rotation period in days.
pub const MOON_ROTATION_DAYS: f64 = 27.0;

/// Angle reached after `day` days by something turning once every
/// `period_days`. A non-positive period means "does not turn".
pub fn rotation_angle(period_days: f64, day: f64) -> f64 {
    if period_days <= 0.0 {
        return 0.0;
    }
    (360.0 / period_days) * day
}

/// The Sun's spin about its own axis.
pub fn sun_self_rotation(day: f64) -> f64 {
    rotation_angle(SUN_ROTATION_DAYS, day)
}

/// The Earth's spin about its own axis.
pub fn earth_self_rotation(day: f64) -> f64 {
    rotation_angle(EARTH_ROTATION_DAYS, day)
}

/// The Earth's revolution around the Sun.
pub fn earth_orbit(day: f64) -> f64 {
    rotation_angle(EARTH_ORBIT_DAYS, day)
}

/// The Moon's revolution around the Earth.
pub fn moon_orbit(day: f64) -> f64 {
    rotation_angle(MOON_ORBIT_DAYS, day)
}

/// The Moon's spin about its own axis.
pub fn moon_self_rotation(day: f64) -> f64 {
    rotation_angle(MOON_ROTATION_DAYS, day)
}

/// The five angles driving one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitalAngles {
    pub sun_self_rotation: f64,
    pub earth_self_rotation: f64,
    pub earth_orbit: f64,
    pub moon_orbit: f64,
    pub moon_self_rotation: f64,
}

impl OrbitalAngles {
    /// Evaluate all five angle functions at `day`.
    pub fn at(day: f64) -> Self {
        Self {
            sun_self_rotation: sun_self_rotation(day),
            earth_self_rotation: earth_self_rotation(day),
            earth_orbit: earth_orbit(day),
            moon_orbit: moon_orbit(day),
            moon_self_rotation: moon_self_rotation(day),
        }
    }

    /// The angles as an array, in declaration order.
    pub fn to_array(self) -> [f64; 5] {
        [
            self.sun_self_rotation,
            self.earth_self_rotation,
            self.earth_orbit,
            self.moon_orbit,
            self.moon_self_rotation,
        ]
    }
}

/// Degrees to single-precision radians, reduced modulo 360 first so large
/// day counts keep their precision.
pub fn to_radians_f32(degrees: f64) -> f32 {
    degrees.rem_euclid(360.0).to_radians() as f32
}
