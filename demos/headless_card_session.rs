use std::sync::Arc;

use thermostat_rs::api::{
    CommandSink, EstimatedLayoutProbe, HassContext, ServiceCall, ThermostatCard,
    ThermostatCardConfig,
};
use thermostat_rs::core::{EntitySnapshot, HvacMode, UnitSystem};
use thermostat_rs::render::NullRenderer;

struct PrintCommands;

impl CommandSink for PrintCommands {
    fn call_service(&mut self, call: ServiceCall) {
        println!(
            "call {}.{} {}",
            call.domain,
            call.service,
            serde_json::Value::Object(call.data)
        );
    }
}

const HALL_STATE: &str = r#"{
    "entity_id": "climate.hall",
    "state": "heat_cool",
    "attributes": {
        "current_temperature": 21.4,
        "target_temp_low": 19,
        "target_temp_high": 23.5,
        "min_temp": 7,
        "max_temp": 35,
        "hvac_modes": ["off", "heat_cool", "cool", "heat"],
        "hvac_action": "heating",
        "preset_mode": "comfort",
        "friendly_name": "Hall"
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = thermostat_rs::telemetry::init_tracing_with_default_directives("thermostat_rs=debug");

    let mut card = ThermostatCard::new(NullRenderer::default());
    card.set_config(ThermostatCardConfig::from_json_str(
        r#"{"type": "thermostat", "entity": "climate.hall"}"#,
    )?)?;
    card.set_command_sink(Box::new(PrintCommands));

    let snapshot = EntitySnapshot::from_state_json(HALL_STATE)?;
    let context = Arc::new(HassContext::new(UnitSystem::metric()).with_snapshot(snapshot));
    card.update(context);
    card.render()?;

    let frame = card.build_frame();
    if let Some(probe) = EstimatedLayoutProbe::from_frame(&frame) {
        if let Some(view_box) = card.render_committed(&probe) {
            println!("set-values viewBox: {}", view_box.attribute());
        }
    }
    card.render_if_dirty()?;

    if let Some(view) = frame.thermostat() {
        println!("{} [{}]", view.name, view.mode_class);
        println!("set: {} / {}", view.set_values.value_text, view.set_values.mode_text);
        let modes: Vec<&str> = view.modes.iter().map(|slot| slot.mode().as_str()).collect();
        println!("modes: {}", modes.join(", "));
    }

    card.mode_selected(&HvacMode::Cool)?;
    println!("frames rendered: {}", card.renderer().render_count);
    Ok(())
}
