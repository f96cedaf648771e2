use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use proptest::prelude::*;
use thermostat_rs::api::{
    CommandSink, HassContext, ServiceCall, ThermostatCard, ThermostatCardConfig,
};
use thermostat_rs::core::{
    EntitySnapshot, HvacMode, PendingSetpoint, UnitSystem, derive_pending_setpoint,
    resolve_step_size, sorted_hvac_modes,
};
use thermostat_rs::render::NullRenderer;

#[derive(Clone, Default)]
struct RecordingSink {
    calls: Rc<RefCell<Vec<ServiceCall>>>,
}

impl CommandSink for RecordingSink {
    fn call_service(&mut self, call: ServiceCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn any_mode() -> impl Strategy<Value = HvacMode> {
    prop_oneof![
        Just(HvacMode::Auto),
        Just(HvacMode::HeatCool),
        Just(HvacMode::Heat),
        Just(HvacMode::Cool),
        Just(HvacMode::Off),
        Just(HvacMode::FanOnly),
        Just(HvacMode::Dry),
        "[a-z]{3,8}".prop_map(|name| HvacMode::parse(&name)),
    ]
}

proptest! {
    #[test]
    fn unavailable_always_resolves_absent(
        target in proptest::option::of(-50.0f64..60.0),
        range in proptest::option::of((-50.0f64..20.0, 20.0f64..60.0)),
        drag in -50.0f64..60.0
    ) {
        let mut available = EntitySnapshot::new("climate.hall", HvacMode::Heat);
        available.target_temperature = target;
        if let Some((low, high)) = range {
            available = available.with_target_range(low, high);
        }
        let mut card = ThermostatCard::new(NullRenderer::default());
        card.set_config(ThermostatCardConfig::new("climate.hall")).expect("config");
        card.update(Arc::new(HassContext::new(UnitSystem::metric()).with_snapshot(available)));
        card.slider_input(drag).expect("drag");

        let mut unavailable = EntitySnapshot::unavailable("climate.hall");
        unavailable.target_temperature = target;
        card.update(Arc::new(HassContext::new(UnitSystem::metric()).with_snapshot(unavailable)));
        prop_assert!(card.pending_setpoint().is_absent());
    }

    #[test]
    fn complete_pair_always_wins_over_single(
        low in -50.0f64..20.0,
        high in 20.0f64..60.0,
        target in proptest::option::of(-50.0f64..60.0)
    ) {
        let mut snapshot = EntitySnapshot::new("climate.hall", HvacMode::HeatCool)
            .with_target_range(low, high);
        snapshot.target_temperature = target;
        prop_assert_eq!(derive_pending_setpoint(&snapshot), PendingSetpoint::Range { low, high });
    }

    #[test]
    fn resolved_step_is_always_positive(
        step in proptest::option::of(prop_oneof![
            -10.0f64..10.0,
            Just(0.0),
            Just(f64::NAN),
            Just(f64::INFINITY),
        ]),
        imperial in any::<bool>()
    ) {
        let mut snapshot = EntitySnapshot::new("climate.hall", HvacMode::Heat);
        snapshot.step_size = step;
        let units = if imperial { UnitSystem::imperial() } else { UnitSystem::metric() };
        let resolved = resolve_step_size(&snapshot, units);
        prop_assert!(resolved.is_finite() && resolved > 0.0);
        if let Some(step) = step.filter(|step| step.is_finite() && *step > 0.0) {
            prop_assert_eq!(resolved, step);
        }
    }

    #[test]
    fn drags_never_dispatch_and_commit_sends_last_value(
        drags in proptest::collection::vec(7.0f64..35.0, 1..20)
    ) {
        let mut card = ThermostatCard::new(NullRenderer::default());
        card.set_config(ThermostatCardConfig::new("climate.hall")).expect("config");
        let sink = RecordingSink::default();
        card.set_command_sink(Box::new(sink.clone()));
        card.update(Arc::new(HassContext::new(UnitSystem::metric()).with_snapshot(
            EntitySnapshot::new("climate.hall", HvacMode::Heat).with_target_temperature(20.0),
        )));

        for value in &drags {
            card.slider_input(*value).expect("drag");
        }
        prop_assert!(sink.calls.borrow().is_empty());

        card.slider_release().expect("release");
        let calls = sink.calls.borrow();
        prop_assert_eq!(calls.len(), 1);
        let last = *drags.last().expect("non-empty");
        prop_assert_eq!(&calls[0], &ServiceCall::set_temperature("climate.hall", last));
    }

    #[test]
    fn mode_sort_is_a_stable_priority_order(
        modes in proptest::collection::vec(any_mode(), 0..12)
    ) {
        let sorted = sorted_hvac_modes(&modes);
        prop_assert_eq!(sorted.len(), modes.len());
        prop_assert!(sorted.windows(2).all(|pair| pair[0].priority() <= pair[1].priority()));

        let unknown_in: Vec<_> = modes.iter().filter(|mode| !mode.is_known()).collect();
        let unknown_out: Vec<_> = sorted.iter().filter(|mode| !mode.is_known()).collect();
        prop_assert_eq!(unknown_in, unknown_out);
    }
}
