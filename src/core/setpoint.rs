use serde::{Deserialize, Serialize};

use super::snapshot::EntitySnapshot;
use super::types::finite;

/// Setpoint the card currently displays.
///
/// Overwritten from the snapshot only when the snapshot identity changes, and
/// by live drag input in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PendingSetpoint {
    #[default]
    Absent,
    Single(f64),
    Range { low: f64, high: f64 },
}

impl PendingSetpoint {
    #[must_use]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Range { .. })
    }

    #[must_use]
    pub const fn single(self) -> Option<f64> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn range(self) -> Option<(f64, f64)> {
        match self {
            Self::Range { low, high } => Some((low, high)),
            _ => None,
        }
    }
}

/// Derives the displayed setpoint from a snapshot.
///
/// Priority: unavailable wins, then a complete low/high pair, then the single
/// target (which may itself be absent).
#[must_use]
pub fn derive_pending_setpoint(snapshot: &EntitySnapshot) -> PendingSetpoint {
    if snapshot.is_unavailable() {
        return PendingSetpoint::Absent;
    }
    if let Some(range) = snapshot.target_range {
        return PendingSetpoint::Range {
            low: range.low,
            high: range.high,
        };
    }
    finite(snapshot.target_temperature).map_or(PendingSetpoint::Absent, PendingSetpoint::Single)
}

#[cfg(test)]
mod tests {
    use super::{PendingSetpoint, derive_pending_setpoint};
    use crate::core::{EntitySnapshot, HvacMode};

    #[test]
    fn unavailable_beats_reported_targets() {
        let snapshot = EntitySnapshot::unavailable("climate.a")
            .with_target_temperature(21.0)
            .with_target_range(18.0, 24.0);
        assert_eq!(derive_pending_setpoint(&snapshot), PendingSetpoint::Absent);
    }

    #[test]
    fn range_beats_single_target() {
        let snapshot = EntitySnapshot::new("climate.a", HvacMode::HeatCool)
            .with_target_temperature(21.0)
            .with_target_range(18.0, 24.0);
        assert_eq!(
            derive_pending_setpoint(&snapshot),
            PendingSetpoint::Range {
                low: 18.0,
                high: 24.0
            }
        );
    }

    #[test]
    fn single_or_absent_without_range() {
        let heat = EntitySnapshot::new("climate.a", HvacMode::Heat).with_target_temperature(21.5);
        assert_eq!(derive_pending_setpoint(&heat), PendingSetpoint::Single(21.5));

        let off = EntitySnapshot::new("climate.a", HvacMode::Off);
        assert_eq!(derive_pending_setpoint(&off), PendingSetpoint::Absent);
    }

    #[test]
    fn zero_degree_band_is_still_a_range() {
        let snapshot =
            EntitySnapshot::new("climate.a", HvacMode::HeatCool).with_target_range(0.0, 5.0);
        assert_eq!(derive_pending_setpoint(&snapshot).range(), Some((0.0, 5.0)));
    }
}
