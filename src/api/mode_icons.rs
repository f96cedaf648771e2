use crate::core::{HvacMode, sorted_hvac_modes};
use crate::render::{IconButton, ModeIcon, ModeRow, ModeSlot};

use super::HassContext;

/// Style class used when the current state has no icon.
pub const UNKNOWN_MODE_CLASS: &str = "unknown-mode";

pub const MORE_INFO_ICON: &str = "mdi:dots-vertical";

/// Icon for each mode the card can display; `None` for unknown modes.
#[must_use]
pub fn mode_icon(mode: &HvacMode) -> Option<&'static str> {
    match mode {
        HvacMode::Auto => Some("mdi:calendar-sync"),
        HvacMode::HeatCool => Some("mdi:autorenew"),
        HvacMode::Heat => Some("mdi:fire"),
        HvacMode::Cool => Some("mdi:snowflake"),
        HvacMode::Off => Some("mdi:power"),
        HvacMode::FanOnly => Some("mdi:fan"),
        HvacMode::Dry => Some("mdi:water-percent"),
        HvacMode::Other(_) => None,
    }
}

/// Card style class for the current mode.
#[must_use]
pub fn mode_class(mode: &HvacMode) -> &str {
    match mode_icon(mode) {
        Some(_) => mode.as_str(),
        None => UNKNOWN_MODE_CLASS,
    }
}

/// Builds the mode row: one slot per supported mode in display priority.
///
/// Unknown modes keep an empty slot so the row length always matches the
/// supported mode count.
#[must_use]
pub fn build_mode_row(
    supported: &[HvacMode],
    current: &HvacMode,
    context: &HassContext,
) -> ModeRow {
    sorted_hvac_modes(supported)
        .into_iter()
        .map(|mode| match mode_icon(&mode) {
            Some(icon) => {
                let label = context.localize(&format!("component.climate.state._.{mode}"));
                ModeSlot::Icon(ModeIcon {
                    selected: &mode == current,
                    button: IconButton {
                        icon: icon.to_owned(),
                        label,
                    },
                    mode,
                })
            }
            None => ModeSlot::Empty { mode },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_mode_row, mode_class, mode_icon};
    use crate::api::{HassContext, MapLocalizer};
    use crate::core::{HvacMode, UnitSystem};
    use std::sync::Arc;

    #[test]
    fn every_known_mode_has_an_icon() {
        for mode in HvacMode::KNOWN {
            assert!(mode_icon(&mode).is_some(), "{mode}");
        }
        assert_eq!(mode_icon(&HvacMode::parse("eco")), None);
    }

    #[test]
    fn unknown_and_unavailable_states_share_a_class() {
        assert_eq!(mode_class(&HvacMode::HeatCool), "heat_cool");
        assert_eq!(mode_class(&HvacMode::parse("eco")), "unknown-mode");
        assert_eq!(mode_class(&HvacMode::parse("unavailable")), "unknown-mode");
    }

    #[test]
    fn row_is_sorted_labelled_and_keeps_unknown_slots() {
        let localizer = MapLocalizer::new()
            .with("component.climate.state._.heat", "Heat")
            .with("component.climate.state._.off", "Off");
        let context = HassContext::new(UnitSystem::metric()).with_localizer(Arc::new(localizer));
        let supported = [
            HvacMode::Off,
            HvacMode::parse("eco"),
            HvacMode::Heat,
        ];

        let row = build_mode_row(&supported, &HvacMode::Heat, &context);
        let modes: Vec<&str> = row.iter().map(|slot| slot.mode().as_str()).collect();
        assert_eq!(modes, ["heat", "off", "eco"]);

        let heat = row[0].icon().expect("heat icon");
        assert!(heat.selected);
        assert_eq!(heat.button.icon, "mdi:fire");
        assert_eq!(heat.button.label, "Heat");
        assert!(!row[1].icon().expect("off icon").selected);
        assert!(row[2].icon().is_none());
    }
}
