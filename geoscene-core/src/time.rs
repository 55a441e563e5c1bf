//! Scene time representation

use serde::{Deserialize, Serialize};

/// A point in scene time, measured in seconds since the scene epoch.
///
/// The pipeline only ever compares and interpolates between times, so a
/// plain f64 offset is sufficient; calendar handling lives outside this
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct SceneTime(f64);

impl SceneTime {
    /// The scene epoch (t = 0)
    pub const EPOCH: SceneTime = SceneTime(0.0);

    /// Create a scene time from seconds since the epoch
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Seconds since the scene epoch
    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// A new time offset by `seconds` (negative moves backwards)
    pub fn offset(&self, seconds: f64) -> Self {
        Self(self.0 + seconds)
    }

    /// Signed number of seconds from `self` to `other`
    pub fn seconds_until(&self, other: SceneTime) -> f64 {
        other.0 - self.0
    }
}
