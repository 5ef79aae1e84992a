use std::f32::consts::PI;

use approx::assert_relative_eq;
use impel_core::{
    ImpelInit, ImpellerState, ModelKind, Settled1f, ValueRange,
    time::{as_millis, millis},
};
use impel_engine::{Action, FrameEvent, ImpelEngine, ImpelError, Impeller, Status};
use impel_models::{OvershootModel, SmoothModel};

/// An angle in radians that wraps around at ±π.
fn angle_init() -> ImpelInit {
    impel_models::register_all();
    OvershootModel::init()
        .with_range(ValueRange::modular(-PI, PI))
        .with_max_velocity(0.021)
        .with_max_delta(3.141)
        .with_at_target(Settled1f::new(0.087, 0.00059))
        .with_accel_per_difference(0.00032)
        .with_wrong_direction_multiplier(4.0)
        .with_max_delta_time(millis(10.0))
}

/// A percentage from 0 to 100 that does not wrap around.
fn percent_init() -> ImpelInit {
    impel_models::register_all();
    OvershootModel::init()
        .with_range(ValueRange::bounded(0.0, 100.0))
        .with_max_velocity(10.0)
        .with_max_delta(50.0)
        .with_at_target(Settled1f::new(0.087, 0.00059))
        .with_accel_per_difference(0.00032)
        .with_wrong_direction_multiplier(4.0)
        .with_max_delta_time(millis(10.0))
}

fn bind(engine: &ImpelEngine, init: &ImpelInit, state: ImpellerState) -> Impeller {
    let mut impeller = Impeller::new();
    impeller
        .initialize_with_state(init, engine, state)
        .expect("init should bind");
    impeller
}

/// Binds a percentage at its upper bound, still pushing outward.
fn bind_at_max(engine: &ImpelEngine, impeller: &mut Impeller) {
    let init = percent_init();
    let state = ImpellerState::new(init.max(), init.max_velocity(), init.max());
    impeller
        .initialize_with_state(&init, engine, state)
        .expect("init should bind");
}

/// Advances in 10 ms frames until `impeller` settles, returning the time taken.
fn time_to_settle(engine: &mut ImpelEngine, impeller: &Impeller, at_target: &Settled1f) -> f32 {
    let run = engine.run(millis(10.0), 1_000, |_: &FrameEvent| {
        at_target.is_settled(impeller).then_some(Action::StopEarly)
    });

    assert_eq!(run.status, Status::StoppedByObserver, "never settled");
    as_millis(run.elapsed)
}

#[test]
fn modular_movement_wraps_from_max_to_min() {
    let mut engine = ImpelEngine::new();
    let impeller = bind(
        &engine,
        &angle_init(),
        ImpellerState::new(PI, 0.001, -PI + 1.0),
    );

    engine.advance_frame(millis(1.0));

    // Moving up from +π passes the top of the range and reappears near -π.
    assert!(impeller.value().unwrap() <= 0.0);
}

#[test]
fn eventually_settles() {
    let init = angle_init();
    let mut engine = ImpelEngine::new();
    let impeller = bind(
        &engine,
        &init,
        ImpellerState::new(0.0, init.max_velocity(), -PI + 1.0),
    );

    let elapsed = time_to_settle(&mut engine, &impeller, init.at_target());

    assert!(elapsed > 0.0);
    assert!(elapsed < 700.0, "took {elapsed} ms");
    assert!(impeller.settled());
}

#[test]
fn settles_on_modular_max() {
    let init = angle_init();
    let mut engine = ImpelEngine::new();
    let impeller = bind(
        &engine,
        &init,
        ImpellerState::new(PI, init.max_velocity(), PI),
    );

    let elapsed = time_to_settle(&mut engine, &impeller, init.at_target());

    assert!(elapsed > 0.0);
    assert!(elapsed < 500.0, "took {elapsed} ms");
}

#[test]
#[allow(clippy::float_cmp)]
fn stays_within_bound() {
    let mut engine = ImpelEngine::new();
    let mut impeller = Impeller::new();
    bind_at_max(&engine, &mut impeller);

    engine.advance_frame(millis(1.0));

    assert_eq!(impeller.value().unwrap(), 100.0);
    assert_eq!(impeller.velocity().unwrap(), 0.0);
}

#[test]
#[allow(clippy::float_cmp)]
fn defragment_preserves_every_survivor() {
    let mut engine = ImpelEngine::new();
    let mut impellers: Vec<Impeller> = (0..4).map(|_| Impeller::new()).collect();

    for hole in 0..impellers.len() {
        for impeller in &mut impellers {
            bind_at_max(&engine, impeller);
        }

        impellers[hole].invalidate();
        assert!(!impellers[hole].is_valid());

        // Compaction runs at the start of every frame.
        engine.advance_frame(millis(1.0));
        assert!(!impellers[hole].is_valid());
        assert_eq!(engine.pending_reclaim(), 0);
        assert_eq!(engine.slot_count(), 3);

        let compare = usize::from(hole == 0);
        let expected = impellers[compare].state().unwrap();
        for (i, impeller) in impellers.iter().enumerate() {
            if i == hole {
                continue;
            }
            let state = impeller.state().unwrap();
            assert_eq!(state.value, expected.value);
            assert_eq!(state.velocity, expected.velocity);
            assert_eq!(state.target_value, expected.target_value);
        }
    }
}

#[test]
#[allow(clippy::float_cmp)]
fn take_transfers_ownership() {
    let engine = ImpelEngine::new();
    let mut original = Impeller::new();
    bind_at_max(&engine, &mut original);
    let value = original.value().unwrap();

    let moved = original.take();

    assert!(!original.is_valid());
    assert!(moved.is_valid());
    assert_eq!(moved.value().unwrap(), value);
}

#[test]
fn take_of_unbound_is_unbound() {
    let mut unbound = Impeller::new();

    let moved = unbound.take();

    assert!(!moved.is_valid());
    assert_eq!(moved.value(), Err(ImpelError::Unbound));
}

#[test]
#[allow(clippy::float_cmp)]
fn rebind_transfers_ownership() {
    let engine = ImpelEngine::new();
    let mut original = Impeller::new();
    bind_at_max(&engine, &mut original);
    let value = original.value().unwrap();

    let mut assigned = Impeller::new();
    assigned.rebind_from(&mut original);

    assert!(!original.is_valid());
    assert!(assigned.is_valid());
    assert_eq!(assigned.value().unwrap(), value);
    assert_eq!(engine.len(), 1);
}

#[test]
fn handles_survive_vec_reallocation() {
    const START: usize = 4;

    let mut engine = ImpelEngine::new();
    let mut impellers: Vec<Impeller> = Vec::with_capacity(START);
    for _ in 0..START {
        let mut impeller = Impeller::new();
        bind_at_max(&engine, &mut impeller);
        impellers.push(impeller);
    }

    // Growing past capacity moves every handle to new storage.
    impellers.resize_with(START * 4, Impeller::new);
    assert!(impellers.iter().take(START).all(Impeller::is_valid));
    assert!(impellers.iter().skip(START).all(|impeller| !impeller.is_valid()));

    for impeller in &mut impellers {
        bind_at_max(&engine, impeller);
        assert!(impeller.is_valid());
    }

    engine.advance_frame(millis(1.0));
    assert_eq!(engine.len(), START * 4);
    assert_eq!(engine.slot_count(), START * 4);
}

#[test]
fn dropping_handles_frees_their_slots() {
    let mut engine = ImpelEngine::new();
    let keep = bind(&engine, &percent_init(), ImpellerState::new(10.0, 0.0, 90.0));
    {
        let _churn: Vec<Impeller> = (0..8)
            .map(|_| bind(&engine, &percent_init(), ImpellerState::at_rest(50.0)))
            .collect();
        assert_eq!(engine.len(), 9);
    }

    assert_eq!(engine.len(), 1);
    assert_eq!(engine.pending_reclaim(), 8);

    engine.advance_frame(millis(16.0));

    assert_eq!(engine.slot_count(), 1);
    assert!(keep.value().unwrap() > 10.0);
}

#[test]
fn unregistered_kind_is_rejected() {
    let engine = ImpelEngine::new();
    let mut impeller = Impeller::new();
    let init = ImpelInit::new(ModelKind::new("never-registered"));

    let result = impeller.initialize_with_state(&init, &engine, ImpellerState::default());

    assert!(matches!(result, Err(ImpelError::Registry(_))));
    assert!(!impeller.is_valid());
    assert!(engine.is_empty());
}

#[test]
fn invalid_configuration_is_rejected() {
    let engine = ImpelEngine::new();
    let mut impeller = Impeller::new();
    let init = percent_init().with_max_delta_time(millis(0.0));

    let result = impeller.initialize_with_state(&init, &engine, ImpellerState::default());

    assert!(matches!(result, Err(ImpelError::InvalidInit(_))));
    assert!(engine.is_empty());
}

#[test]
fn channels_use_their_own_models() {
    impel_models::register_all();
    let smooth_init = SmoothModel::init()
        .with_range(ValueRange::bounded(0.0, 100.0))
        .with_at_target(Settled1f::new(0.087, 0.00059));

    let mut engine = ImpelEngine::new();
    let smooth = bind(&engine, &smooth_init, ImpellerState::new(0.0, 0.0, 50.0));
    let overshoot = bind(&engine, &percent_init(), ImpellerState::new(0.0, 0.0, 50.0));

    let mut smooth_peak: f32 = 0.0;
    let mut overshoot_peak: f32 = 0.0;
    engine.run(millis(10.0), 300, |_: &FrameEvent| {
        smooth_peak = smooth_peak.max(smooth.value().ok()?);
        overshoot_peak = overshoot_peak.max(overshoot.value().ok()?);
        None
    });

    assert!(smooth_peak <= 50.0, "smooth overshot to {smooth_peak}");
    assert!(overshoot_peak > 50.0, "overshoot never passed its target");
    assert_relative_eq!(smooth.value().unwrap(), 50.0);
    assert_eq!(smooth.init().map(|init| init.kind()), Ok(SmoothModel::KIND));
    assert_eq!(overshoot.init().map(|init| init.kind()), Ok(OvershootModel::KIND));
}

#[test]
fn handles_report_a_dropped_engine() {
    let engine = ImpelEngine::new();
    let mut impeller = Impeller::new();
    bind_at_max(&engine, &mut impeller);

    drop(engine);

    assert_eq!(impeller.value(), Err(ImpelError::EngineDropped));
    assert!(!impeller.settled());
    // Releasing a handle after its engine is gone is a no-op.
    impeller.invalidate();
    assert_eq!(impeller.value(), Err(ImpelError::Unbound));
}
