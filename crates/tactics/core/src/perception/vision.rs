/// Vision cone of an observer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisionParameters {
    /// Full opening angle of the cone, in degrees.
    pub angle_degrees: f32,
    /// Maximum sight distance in world units.
    pub distance: f32,
}

impl VisionParameters {
    pub const DEFAULT_ANGLE_DEGREES: f32 = 90.0;
    pub const DEFAULT_DISTANCE: f32 = 1000.0;

    pub fn new(angle_degrees: f32, distance: f32) -> Self {
        Self {
            angle_degrees,
            distance,
        }
    }

    /// Minimum cosine between the forward vector and a visible direction.
    pub fn min_cosine(&self) -> f32 {
        (self.angle_degrees.to_radians() / 2.0).cos()
    }
}

impl Default for VisionParameters {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANGLE_DEGREES, Self::DEFAULT_DISTANCE)
    }
}

/// Optional hearing channel.
///
/// A moving target within range raises awareness at `weight` times the
/// sight rate. Hearing never feeds the occupancy map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HearingParameters {
    pub range: f32,
    /// Targets slower than this are silent.
    pub min_speed: f32,
    pub weight: f32,
}

impl HearingParameters {
    pub const DEFAULT_RANGE: f32 = 1000.0;
    pub const DEFAULT_MIN_SPEED: f32 = 200.0;
    pub const DEFAULT_WEIGHT: f32 = 0.5;
}

impl Default for HearingParameters {
    fn default() -> Self {
        Self {
            range: Self::DEFAULT_RANGE,
            min_speed: Self::DEFAULT_MIN_SPEED,
            weight: Self::DEFAULT_WEIGHT,
        }
    }
}
