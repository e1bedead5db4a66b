use crate::grid::WorldPoint;

/// How much the trackers know about a target.
///
/// `Unknown` is left on the first observation and never re-entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetState {
    /// Never observed.
    #[default]
    Unknown,
    /// Observed before, not directly seen this tick.
    Hidden,
    /// Some observer is fully aware of the target this tick.
    Immediate,
}

impl TargetState {
    #[inline]
    pub fn is_known(self) -> bool {
        !matches!(self, TargetState::Unknown)
    }
}

/// Best single-point estimate of a target.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastKnownState {
    pub state: TargetState,
    pub position: WorldPoint,
    pub velocity: WorldPoint,
}

/// Tri-state knowledge plus the last-known snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TargetBelief {
    last_known: LastKnownState,
}

impl TargetBelief {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> TargetState {
        self.last_known.state
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.last_known.state.is_known()
    }

    #[inline]
    pub fn last_known(&self) -> &LastKnownState {
        &self.last_known
    }

    /// Position estimate, once the target has been observed.
    pub fn estimate(&self) -> Option<WorldPoint> {
        self.is_known().then_some(self.last_known.position)
    }

    /// Direct observation: becomes `Immediate` with the observed pose.
    pub fn observe(&mut self, position: WorldPoint, velocity: WorldPoint) {
        self.last_known = LastKnownState {
            state: TargetState::Immediate,
            position,
            velocity,
        };
    }

    /// Observation lapsed: a known target becomes `Hidden`.
    pub fn lose_sight(&mut self) {
        if self.is_known() {
            self.last_known.state = TargetState::Hidden;
        }
    }

    /// Replaces the snapshot with a stationary estimate at `position`.
    pub fn set_estimate(&mut self, position: WorldPoint) {
        self.last_known.position = position;
        self.last_known.velocity = WorldPoint::ZERO;
    }
}
