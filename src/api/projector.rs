use crate::core::{
    EntitySnapshot, PRESET_NONE, PendingSetpoint, SliderRange, entity_object_id, finite,
    slider_value,
};
use crate::render::{
    CURRENT_TEMPERATURE_VIEW_BOX, CardFrame, CurrentTemperatureView, EntityNotFoundView,
    IconButton, Renderer, SetValuesView, SliderView, ThermostatView, ViewBox,
};

use super::mode_icons::{MORE_INFO_ICON, build_mode_row, mode_class};
use super::number_format::{NumberFormatOptions, format_number};
use super::{HassContext, ThermostatCard, ThermostatCardConfig};

const ENTITY_NOT_FOUND_KEY: &str = "ui.panel.lovelace.warning.entity_not_found";
const ENTITY_NOT_FOUND_FALLBACK: &str = "Entity not available";
const UNAVAILABLE_KEY: &str = "state.default.unavailable";
const MORE_INFO_KEY: &str = "ui.panel.lovelace.cards.show_more_info";

impl<R: Renderer> ThermostatCard<R> {
    /// Projects the current state into a frame without rendering it.
    ///
    /// Pure with respect to card state: the pending setpoint must already be
    /// reconciled by `update`.
    #[must_use]
    pub fn build_frame(&self) -> CardFrame {
        let (Some(config), Some(context)) = (&self.core.config, &self.core.context) else {
            return CardFrame::Empty;
        };
        let Some(snapshot) = context.state(&config.entity) else {
            return CardFrame::EntityNotFound(entity_not_found(context, &config.entity));
        };

        let view = project_thermostat(
            config,
            context,
            snapshot,
            self.core.pending_setpoint,
            self.core.autoscaler.view_box(),
        );
        CardFrame::Thermostat(Box::new(view))
    }
}

fn entity_not_found(context: &HassContext, entity_id: &str) -> EntityNotFoundView {
    let message = context
        .try_localize(ENTITY_NOT_FOUND_KEY)
        .unwrap_or_else(|| ENTITY_NOT_FOUND_FALLBACK.to_owned());
    EntityNotFoundView {
        entity_id: entity_id.to_owned(),
        message,
    }
}

fn project_thermostat(
    config: &ThermostatCardConfig,
    context: &HassContext,
    snapshot: &EntitySnapshot,
    pending: PendingSetpoint,
    set_values_view_box: Option<ViewBox>,
) -> ThermostatView {
    let range = SliderRange::from_snapshot(snapshot, context.unit_system());
    let slider = if snapshot.is_unavailable() {
        SliderView::Disabled
    } else {
        SliderView::Enabled {
            value: slider_value(snapshot),
            range,
        }
    };

    ThermostatView {
        entity_id: config.entity.clone(),
        name: display_name(config, snapshot),
        mode_class: mode_class(&snapshot.mode).to_owned(),
        more_info: IconButton {
            icon: MORE_INFO_ICON.to_owned(),
            label: context.localize(MORE_INFO_KEY),
        },
        slider,
        current_temperature: current_temperature(context, snapshot),
        set_values: SetValuesView {
            value_text: set_value_text(context, snapshot, pending, range),
            mode_text: mode_text(context, snapshot),
            view_box: set_values_view_box,
        },
        modes: build_mode_row(&snapshot.supported_modes, &snapshot.mode, context),
    }
}

/// Config override, then the friendly name, then the object id with
/// underscores turned into spaces.
#[must_use]
pub fn display_name(config: &ThermostatCardConfig, snapshot: &EntitySnapshot) -> String {
    if let Some(name) = config.name_override() {
        return name.to_owned();
    }
    match snapshot.friendly_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => entity_object_id(&snapshot.entity_id).replace('_', " "),
    }
}

fn current_temperature(context: &HassContext, snapshot: &EntitySnapshot) -> CurrentTemperatureView {
    let value = finite(snapshot.current_temperature).map(|reading| {
        format_number(reading, context.locale(), NumberFormatOptions::default())
    });
    CurrentTemperatureView {
        value,
        unit: context.unit_system().temperature.symbol().to_owned(),
        view_box: CURRENT_TEMPERATURE_VIEW_BOX,
    }
}

/// Text of the set-value readout.
///
/// Whole-degree steps drop the fraction; any other step shows exactly one
/// fraction digit.
#[must_use]
pub fn set_value_text(
    context: &HassContext,
    snapshot: &EntitySnapshot,
    pending: PendingSetpoint,
    range: SliderRange,
) -> String {
    if snapshot.is_unavailable() {
        return context
            .try_localize(UNAVAILABLE_KEY)
            .unwrap_or_else(|| snapshot.state.clone());
    }
    let options = if range.uses_whole_degrees() {
        NumberFormatOptions::whole()
    } else {
        NumberFormatOptions::fixed(1)
    };
    let format = |value: f64| format_number(value, context.locale(), options);
    match pending {
        PendingSetpoint::Absent => String::new(),
        PendingSetpoint::Single(value) => format(value),
        PendingSetpoint::Range { low, high } => format!("{} - {}", format(low), format(high)),
    }
}

/// Action (or state) label, followed by the active preset.
#[must_use]
pub fn mode_text(context: &HassContext, snapshot: &EntitySnapshot) -> String {
    let mut text = match snapshot.hvac_action.as_deref().filter(|action| !action.is_empty()) {
        Some(action) => localize_or_raw(
            context,
            &format!("state_attributes.climate.hvac_action.{action}"),
            action,
        ),
        None => localize_or_raw(
            context,
            &format!("component.climate.state._.{}", snapshot.state),
            &snapshot.state,
        ),
    };
    if let Some(preset) = snapshot
        .preset_mode
        .as_deref()
        .filter(|preset| !preset.is_empty() && *preset != PRESET_NONE)
    {
        let preset = localize_or_raw(
            context,
            &format!("state_attributes.climate.preset_mode.{preset}"),
            preset,
        );
        text.push_str(" - ");
        text.push_str(&preset);
    }
    text
}

fn localize_or_raw(context: &HassContext, key: &str, raw: &str) -> String {
    context.try_localize(key).unwrap_or_else(|| raw.to_owned())
}
