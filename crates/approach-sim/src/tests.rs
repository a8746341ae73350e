//! Tests for the airspace engine, its systems, and session progression.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use approach_core::commands::{AircraftCommand, PlayerCommand};
use approach_core::components::Aircraft;
use approach_core::config::{AirspaceGeometry, LevelConfig, LevelTable};
use approach_core::constants::DT;
use approach_core::enums::*;
use approach_core::events::SimEvent;
use approach_core::state::GameStateSnapshot;
use approach_core::types::Position;
use approach_flight::profiles::get_profile;

use crate::engine::{Airspace, SimConfig};
use crate::factory::{build_aircraft, roll_category};

fn aircraft(id: u32, x: f64, y: f64, altitude: f64, state: FlightState) -> Aircraft {
    Aircraft {
        id,
        callsign: format!("T{id:03}"),
        category: AircraftCategory::Commercial,
        position: Position::new(x, y),
        altitude,
        heading: 0.0,
        target_heading: 0.0,
        speed: 200.0,
        fuel: 100.0,
        consumption: 0.4,
        base_score: 100,
        state,
        emergency: None,
        score_counted: false,
        despawn_timer: 0.0,
    }
}

fn running_airspace() -> Airspace {
    let mut airspace = Airspace::new(SimConfig::default());
    airspace.start();
    airspace
}

fn view<'a>(snapshot: &'a GameStateSnapshot, callsign: &str) -> &'a approach_core::state::AircraftView {
    snapshot
        .aircraft
        .iter()
        .find(|a| a.callsign == callsign)
        .unwrap_or_else(|| panic!("{callsign} missing from snapshot"))
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut a = Airspace::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut b = Airspace::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    a.queue_command(PlayerCommand::StartGame);
    b.queue_command(PlayerCommand::StartGame);

    for _ in 0..1_000 {
        let json_a = serde_json::to_string(&a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&b.tick(DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = Airspace::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut b = Airspace::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    a.queue_command(PlayerCommand::StartGame);
    b.queue_command(PlayerCommand::StartGame);

    let mut diverged = false;
    for _ in 0..400 {
        let json_a = serde_json::to_string(&a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&b.tick(DT)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Session control ----

#[test]
fn test_idle_airspace_does_not_advance() {
    let mut airspace = Airspace::new(SimConfig::default());
    for _ in 0..500 {
        airspace.tick(DT);
    }
    assert_eq!(airspace.time().tick, 0);
    assert!(airspace.world().is_empty());
    assert!(!airspace.snapshot().running);
}

#[test]
fn test_tick_timing_follows_dt() {
    let mut airspace = running_airspace();
    for _ in 0..30 {
        airspace.tick(DT);
    }
    assert_eq!(airspace.time().tick, 30);
    assert!((airspace.time().elapsed_secs - 0.9).abs() < 1e-9);
}

#[test]
fn test_surrender_halts_and_resets() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Crashed));
    airspace.tick(DT);
    assert_eq!(airspace.score().score, -50);

    airspace.queue_command(PlayerCommand::Surrender);
    let snap = airspace.tick(DT);
    assert!(!snap.running);
    assert_eq!(snap.score.score, 0);
    assert!(snap.aircraft.is_empty());
    assert_eq!(snap.level.current, 1);
    assert_eq!(airspace.time().tick, 0, "Time should not advance after surrender");
}

#[test]
fn test_reset_discards_pending_events_and_commands() {
    let mut airspace = running_airspace();
    let mut disabled = aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying);
    disabled.emergency = Some(Emergency::Mayday);
    airspace.insert_test_aircraft(disabled);

    // Rejection event stays pending until a snapshot drains it.
    airspace.issue_command("T001", AircraftCommand::Speed(50.0));
    airspace.update(DT);
    airspace.issue_command("T001", AircraftCommand::Hold);

    airspace.reset();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    let snap = airspace.tick(DT);
    assert!(
        !snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::CommandRejected { .. })),
        "Events from the abandoned session leaked: {:?}",
        snap.events
    );
    assert_eq!(view(&snap, "T001").state, FlightState::Flying);
}

#[test]
fn test_commands_behind_restart_apply_to_new_session() {
    let mut airspace = Airspace::new(SimConfig::default());
    airspace.queue_commands([PlayerCommand::Surrender, PlayerCommand::StartGame]);

    let snap = airspace.tick(DT);
    assert!(snap.running);
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_restart_resets_to_level_one_running() {
    let mut airspace = running_airspace();
    airspace.session_mut().level = 3;
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Landed));
    airspace.tick(DT);
    assert_eq!(airspace.score().landed, 1);

    airspace.queue_command(PlayerCommand::Restart);
    let snap = airspace.tick(DT);
    assert!(snap.running);
    assert_eq!(snap.level.current, 1);
    assert_eq!(snap.level.spawned, 0);
    assert_eq!(snap.score, Default::default());
    assert_eq!(airspace.time().tick, 1, "Restart tick itself runs the step");
}

// ---- Factory ----

#[test]
fn test_category_mix_weighted() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let draws = 30_000;
    let mut counts = [0usize; 3];
    for _ in 0..draws {
        let idx = match roll_category(&mut rng) {
            AircraftCategory::Commercial => 0,
            AircraftCategory::Private => 1,
            AircraftCategory::Fighter => 2,
        };
        counts[idx] += 1;
    }

    let expected = [0.6, 0.3, 0.1];
    for (count, share) in counts.iter().zip(expected) {
        let observed = *count as f64 / draws as f64;
        assert!(
            (observed - share).abs() < 0.02,
            "Category share {observed} too far from {share} ({counts:?})"
        );
    }
}

#[test]
fn test_built_aircraft_follow_category_profile() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let geometry = AirspaceGeometry::default();

    for category in [
        AircraftCategory::Commercial,
        AircraftCategory::Private,
        AircraftCategory::Fighter,
    ] {
        let profile = get_profile(category);
        for id in 1..=50 {
            let ac = build_aircraft(&mut rng, &geometry, category, id);
            assert_eq!(ac.category, category);
            assert!(
                (profile.min_speed as f64..=profile.max_speed as f64).contains(&ac.speed),
                "{category:?} speed {} outside profile",
                ac.speed
            );
            assert_eq!(ac.fuel, profile.fuel);
            assert_eq!(ac.consumption, profile.consumption);
            assert_eq!(ac.base_score, profile.base_score);
            assert!(ac.callsign.starts_with(profile.prefix));
            assert!(ac.callsign.ends_with(&format!("{id:03}")));
            assert!(ac.emergency.is_none());
            assert!(!ac.score_counted);
        }
    }
}

// ---- Spawning ----

#[test]
fn test_first_spawn_waits_for_interval() {
    let mut airspace = running_airspace();

    // Level 1 spawns every 8 s; 260 steps of 30 ms is 7.8 s.
    for _ in 0..260 {
        airspace.tick(DT);
    }
    assert!(airspace.world().is_empty());
    assert!(airspace.time_before_next_spawn() > 0.0);

    let mut spawned = Vec::new();
    for _ in 0..20 {
        let snap = airspace.tick(DT);
        spawned.extend(
            snap.events
                .into_iter()
                .filter(|e| matches!(e, SimEvent::AircraftSpawned { .. })),
        );
    }
    assert_eq!(spawned.len(), 1);
    assert_eq!(airspace.session().planes_spawned, 1);
}

#[test]
fn test_spawned_aircraft_on_ring_inbound() {
    let mut airspace = running_airspace();
    for _ in 0..20 {
        airspace.spawn_test_aircraft();
    }
    let snap = airspace.snapshot();
    // Quota for level 1 caps the burst.
    assert_eq!(snap.aircraft.len(), 5);

    let center = airspace.geometry().center;
    for ac in &snap.aircraft {
        let r = ac.position.distance_to(&center);
        assert!((r - 450.0).abs() < 1e-6, "{} spawned at radius {r}", ac.callsign);
        assert!((2000.0..=4000.0).contains(&ac.altitude));
        assert_eq!(ac.heading, ac.target_heading);
        assert_eq!(ac.state, FlightState::Flying);

        // Pointed within 45 degrees of the center.
        let to_center = ac.position.heading_to(&center);
        let off = approach_flight::fsm::heading_difference(ac.heading, to_center);
        assert!(off.abs() <= 45.0 + 1e-6, "{} heading off by {off}", ac.callsign);
    }

    let callsigns: Vec<_> = snap.aircraft.iter().map(|a| a.callsign.clone()).collect();
    for (idx, callsign) in callsigns.iter().enumerate() {
        assert!(
            callsign.ends_with(&format!("{:03}", idx + 1)),
            "Callsign {callsign} out of sequence"
        );
    }
}

#[test]
fn test_spawn_quota_respected() {
    let levels = LevelTable::new(vec![LevelConfig::new(2, 0.1, 0)]).unwrap();
    let mut airspace = Airspace::new(SimConfig {
        levels,
        ..Default::default()
    });
    airspace.start();

    let mut spawn_events = 0;
    for _ in 0..100 {
        let snap = airspace.tick(DT);
        spawn_events += snap
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::AircraftSpawned { .. }))
            .count();
    }

    assert_eq!(spawn_events, 2);
    assert_eq!(airspace.session().planes_spawned, 2);
    assert_eq!(airspace.time_before_next_spawn(), 0.0);
    assert_eq!(airspace.snapshot().level.next_spawn_secs, 0.0);
}

// ---- Emergencies ----

#[test]
fn test_emergencies_only_for_aircraft_en_route() {
    let mut airspace = running_airspace();
    // The per-step chance reaches certainty at this level number.
    airspace.session_mut().level = 5_000;

    airspace.insert_test_aircraft(aircraft(1, 300.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(2, 700.0, 500.0, 3000.0, FlightState::Holding));
    airspace.insert_test_aircraft(aircraft(3, 500.0, 300.0, 3000.0, FlightState::Landing));

    let snap = airspace.tick(DT);
    assert!(view(&snap, "T001").emergency.is_some());
    assert!(view(&snap, "T002").emergency.is_some());
    assert!(view(&snap, "T003").emergency.is_none());

    let declared = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::EmergencyDeclared { .. }))
        .count();
    assert_eq!(declared, 2);
}

#[test]
fn test_emergency_declared_once() {
    let mut airspace = running_airspace();
    airspace.session_mut().level = 5_000;
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    airspace.tick(DT);
    let snap = airspace.tick(DT);
    assert!(
        !snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::EmergencyDeclared { .. })),
        "An aircraft carries at most one emergency"
    );
}

// ---- Scoring ----

#[test]
fn test_five_landings_complete_level_one() {
    let mut airspace = running_airspace();
    for id in 1..=5 {
        airspace.insert_test_aircraft(aircraft(id, 500.0, 900.0, 0.0, FlightState::Landed));
    }

    let snap = airspace.tick(DT);
    assert_eq!(snap.score.score, 500);
    assert_eq!(snap.score.landed, 5);
    assert!(snap.aircraft.is_empty(), "Landed aircraft leave after scoring");
    assert!(snap.level_complete);
    assert!(!snap.game_over);
    assert!(snap
        .events
        .contains(&SimEvent::LevelComplete { level: 1, score: 500 }));
}

#[test]
fn test_three_landings_two_crashes_is_game_over() {
    let mut airspace = running_airspace();
    for id in 1..=3 {
        airspace.insert_test_aircraft(aircraft(id, 500.0, 900.0, 0.0, FlightState::Landed));
    }
    for id in 4..=5 {
        airspace.insert_test_aircraft(aircraft(id, 200.0, 200.0, 0.0, FlightState::Crashed));
    }

    let snap = airspace.tick(DT);
    assert_eq!(snap.score.score, 200);
    assert_eq!(snap.aircraft.len(), 2, "Crashed aircraft linger");
    assert!(!snap.game_over, "Level stays open while wreckage is shown");

    let mut ticks = 1;
    while !airspace.session().is_resolved() && ticks < 200 {
        airspace.tick(DT);
        ticks += 1;
    }

    assert!(airspace.session().game_over);
    assert!(!airspace.session().level_complete);
    assert_eq!(airspace.score().score, 200);
    assert_eq!(airspace.score().crashed, 2);
}

#[test]
fn test_scoring_counted_once() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 0.0, FlightState::Crashed));
    airspace.insert_test_aircraft(aircraft(2, 100.0, 500.0, 3000.0, FlightState::OutOfBounds));

    for _ in 0..30 {
        airspace.tick(DT);
    }
    assert_eq!(airspace.score().score, -70);
    assert_eq!(airspace.score().crashed, 1);
    assert_eq!(airspace.score().out_of_bounds, 1);
}

#[test]
fn test_emergency_landing_bonus() {
    let mut airspace = running_airspace();
    let mut mayday = aircraft(1, 500.0, 900.0, 0.0, FlightState::Landed);
    mayday.emergency = Some(Emergency::Mayday);
    let mut urgency = aircraft(2, 500.0, 900.0, 0.0, FlightState::Landed);
    urgency.emergency = Some(Emergency::Urgency);
    airspace.insert_test_aircraft(mayday);
    airspace.insert_test_aircraft(urgency);

    let snap = airspace.tick(DT);
    assert!(snap.events.contains(&SimEvent::AircraftLanded {
        callsign: "T001".into(),
        points: 400,
    }));
    assert!(snap.events.contains(&SimEvent::AircraftLanded {
        callsign: "T002".into(),
        points: 250,
    }));
    assert_eq!(snap.score.score, 650);
}

// ---- Retention ----

#[test]
fn test_crashed_aircraft_despawn_after_grace() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 0.0, FlightState::Crashed));

    for _ in 0..60 {
        airspace.tick(DT);
    }
    assert_eq!(airspace.world().len(), 1, "Still inside the 2 s grace period");

    for _ in 0..10 {
        airspace.tick(DT);
    }
    assert!(airspace.world().is_empty());
}

#[test]
fn test_far_out_of_bounds_dropped_immediately() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 1201.0, 500.0, 3000.0, FlightState::OutOfBounds));
    airspace.insert_test_aircraft(aircraft(2, 1100.0, 500.0, 3000.0, FlightState::OutOfBounds));

    let snap = airspace.tick(DT);
    assert_eq!(snap.aircraft.len(), 1);
    assert_eq!(snap.aircraft[0].callsign, "T002");
    assert_eq!(snap.score.score, -40, "Both are penalized before removal");
}

#[test]
fn test_aircraft_leaving_airspace() {
    let mut airspace = running_airspace();
    let mut outbound = aircraft(1, 500.0, -5.0, 3000.0, FlightState::Flying);
    outbound.speed = 800.0;
    airspace.insert_test_aircraft(outbound);

    let mut left = false;
    for _ in 0..5 {
        let snap = airspace.tick(DT);
        if snap.events.contains(&SimEvent::AircraftOutOfBounds {
            callsign: "T001".into(),
        }) {
            left = true;
            assert_eq!(view(&snap, "T001").state, FlightState::OutOfBounds);
            break;
        }
    }
    assert!(left);
}

// ---- Fuel ----

#[test]
fn test_fuel_exhaustion_crashes_en_route() {
    let mut airspace = running_airspace();
    let mut dry = aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying);
    dry.fuel = 0.0;
    let mut dry_landing = aircraft(2, 200.0, 200.0, 3000.0, FlightState::Landing);
    dry_landing.fuel = -1.0;
    airspace.insert_test_aircraft(dry);
    airspace.insert_test_aircraft(dry_landing);

    let snap = airspace.tick(DT);
    let crashed = view(&snap, "T001");
    assert_eq!(crashed.state, FlightState::Crashed);
    assert_eq!(crashed.position, Position::new(500.0, 500.0), "No physics once crashed");
    assert!(snap.events.contains(&SimEvent::AircraftCrashed {
        callsign: "T001".into(),
        cause: CrashCause::FuelExhausted,
    }));

    assert_eq!(view(&snap, "T002").state, FlightState::Landing);
}

#[test]
fn test_fuel_never_increases_en_route() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));
    let mut last = 100.0;
    for _ in 0..50 {
        let snap = airspace.tick(DT);
        let fuel = view(&snap, "T001").fuel;
        assert!(fuel <= last);
        last = fuel;
    }
    assert!(last < 100.0);
}

// ---- Collisions ----

#[test]
fn test_collision_inside_both_thresholds() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(2, 520.0, 500.0, 3050.0, FlightState::Holding));

    let snap = airspace.tick(DT);
    assert_eq!(view(&snap, "T001").state, FlightState::Crashed);
    assert_eq!(view(&snap, "T002").state, FlightState::Crashed);
    assert!(snap.events.contains(&SimEvent::MidAirCollision {
        first: "T001".into(),
        second: "T002".into(),
    }) || snap.events.contains(&SimEvent::MidAirCollision {
        first: "T002".into(),
        second: "T001".into(),
    }));
}

#[test]
fn test_no_collision_outside_either_threshold() {
    let mut airspace = running_airspace();
    // Horizontal separation kept.
    airspace.insert_test_aircraft(aircraft(1, 300.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(2, 340.0, 500.0, 3000.0, FlightState::Flying));
    // Vertical separation kept, exactly at the limit.
    airspace.insert_test_aircraft(aircraft(3, 700.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(4, 700.0, 500.0, 3100.0, FlightState::Flying));

    let snap = airspace.tick(DT);
    for ac in &snap.aircraft {
        assert_eq!(ac.state, FlightState::Flying, "{} should not collide", ac.callsign);
    }
}

#[test]
fn test_collision_involves_every_overlapping_aircraft() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(2, 510.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(3, 490.0, 500.0, 3000.0, FlightState::Flying));

    let snap = airspace.tick(DT);
    assert!(snap.aircraft.iter().all(|a| a.state == FlightState::Crashed));
    let collisions = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::MidAirCollision { .. }))
        .count();
    assert_eq!(collisions, 3);
    let crash_reports = snap
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SimEvent::AircraftCrashed {
                    cause: CrashCause::MidAirCollision,
                    ..
                }
            )
        })
        .count();
    assert_eq!(crash_reports, 3, "One crash report per aircraft");
}

#[test]
fn test_landed_aircraft_do_not_collide() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(2, 505.0, 500.0, 3000.0, FlightState::OutOfBounds));

    let snap = airspace.tick(DT);
    assert_eq!(view(&snap, "T001").state, FlightState::Flying);
}

// ---- Landing ----

#[test]
fn test_touchdown_close_to_threshold_lands() {
    let mut airspace = running_airspace();
    let mut landing = aircraft(1, 500.0, 895.0, 10.0, FlightState::Landing);
    landing.speed = 0.5;
    airspace.insert_test_aircraft(landing);

    let snap = airspace.tick(DT);
    let ac = view(&snap, "T001");
    assert_eq!(ac.state, FlightState::Landed);
    assert_eq!(ac.altitude, 0.0);

    let snap = airspace.tick(DT);
    assert!(snap.aircraft.is_empty());
    assert_eq!(snap.score.score, 100);
    assert_eq!(snap.score.landed, 1);
}

#[test]
fn test_ground_contact_off_runway_crashes() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 200.0, 500.0, 0.0, FlightState::Flying));

    let snap = airspace.tick(DT);
    assert_eq!(view(&snap, "T001").state, FlightState::Crashed);
    assert!(snap.events.contains(&SimEvent::AircraftCrashed {
        callsign: "T001".into(),
        cause: CrashCause::Terrain,
    }));
}

#[test]
fn test_full_approach_from_clearance_to_landing() {
    let mut airspace = running_airspace();
    let mut inbound = aircraft(1, 500.0, 700.0, 900.0, FlightState::Flying);
    inbound.heading = 180.0;
    inbound.target_heading = 180.0;
    inbound.speed = 250.0;
    airspace.insert_test_aircraft(inbound);

    assert_eq!(airspace.landing_clearance("T001"), Some(Vec::new()));
    airspace.issue_command("T001", AircraftCommand::Land);

    let mut landed = false;
    for _ in 0..3_000 {
        let snap = airspace.tick(DT);
        if snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::AircraftLanded { .. }))
        {
            landed = true;
            break;
        }
    }
    assert!(landed, "Cleared aircraft should reach the runway");
    assert_eq!(airspace.score().landed, 1);
    assert_eq!(airspace.score().crashed, 0);
}

// ---- Commands ----

#[test]
fn test_commands_apply_on_next_tick() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    airspace.issue_command("T001", AircraftCommand::Heading(90.0));
    assert_eq!(view(&airspace.snapshot(), "T001").target_heading, 0.0);

    let snap = airspace.tick(DT);
    let ac = view(&snap, "T001");
    assert_eq!(ac.target_heading, 90.0);
    assert_eq!(ac.heading, 3.0);
}

#[test]
fn test_commands_apply_through_update() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    airspace.issue_command("T001", AircraftCommand::Heading(90.0));
    for _ in 0..10 {
        airspace.update(DT);
    }

    let snap = airspace.snapshot();
    let ac = view(&snap, "T001");
    assert_eq!(ac.target_heading, 90.0);
    assert!((ac.heading - 30.0).abs() < 1e-9);
}

#[test]
fn test_session_commands_apply_through_update_while_idle() {
    let mut airspace = Airspace::new(SimConfig::default());
    airspace.queue_command(PlayerCommand::StartGame);
    airspace.update(DT);

    assert!(airspace.session().running);
    assert_eq!(airspace.time().tick, 1);
}

#[test]
fn test_mayday_ignores_speed_command() {
    let mut airspace = running_airspace();
    let mut disabled = aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying);
    disabled.emergency = Some(Emergency::Mayday);
    disabled.speed = 300.0;
    airspace.insert_test_aircraft(disabled);

    airspace.issue_command("T001", AircraftCommand::Speed(100.0));
    let snap = airspace.tick(DT);

    assert!(view(&snap, "T001").speed <= 300.0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CommandRejected { callsign, .. } if callsign == "T001")));
}

#[test]
fn test_mayday_accepts_land() {
    let mut airspace = running_airspace();
    let mut disabled = aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying);
    disabled.emergency = Some(Emergency::Mayday);
    airspace.insert_test_aircraft(disabled);

    airspace.issue_command("T001", AircraftCommand::Land);
    let snap = airspace.tick(DT);
    assert_eq!(view(&snap, "T001").state, FlightState::Landing);
}

#[test]
fn test_unknown_callsign_ignored() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    airspace.issue_command("ZZ999", AircraftCommand::Hold);
    let snap = airspace.tick(DT);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CommandRejected { .. })));
    assert_eq!(view(&snap, "T001").state, FlightState::Flying);
}

#[test]
fn test_hold_then_heading_releases() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    airspace.issue_command("T001", AircraftCommand::Hold);
    let snap = airspace.tick(DT);
    assert_eq!(view(&snap, "T001").state, FlightState::Holding);

    airspace.issue_command("T001", AircraftCommand::Heading(270.0));
    let snap = airspace.tick(DT);
    assert_eq!(view(&snap, "T001").state, FlightState::Flying);
    assert_eq!(view(&snap, "T001").target_heading, 270.0);
}

#[test]
fn test_landing_clearance_lookup() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 500.0, 3000.0, FlightState::Flying));

    let refusals = airspace.landing_clearance("T001").unwrap();
    assert!(refusals.contains(&LandingRefusal::WrongHeading));
    assert!(refusals.contains(&LandingRefusal::TooHigh));
    assert!(!refusals.contains(&LandingRefusal::TooFast));
    assert_eq!(airspace.landing_clearance("ZZ999"), None);

    let snap = airspace.snapshot();
    assert_eq!(view(&snap, "T001").landing_refusals, refusals);
}

// ---- Progression ----

#[test]
fn test_progression_waits_for_full_quota() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 900.0, 0.0, FlightState::Landed));

    let snap = airspace.tick(DT);
    assert!(snap.aircraft.is_empty());
    assert_eq!(snap.level.spawned, 1);
    assert!(!snap.level_complete);
    assert!(!snap.game_over);
}

#[test]
fn test_progression_waits_for_empty_airspace() {
    let mut airspace = running_airspace();
    for id in 1..=4 {
        airspace.insert_test_aircraft(aircraft(id, 500.0, 900.0, 0.0, FlightState::Landed));
    }
    airspace.insert_test_aircraft(aircraft(5, 200.0, 500.0, 3000.0, FlightState::Flying));

    for _ in 0..10 {
        let snap = airspace.tick(DT);
        assert!(!snap.level_complete && !snap.game_over);
    }
}

#[test]
fn test_resolved_level_freezes_simulation() {
    let mut airspace = running_airspace();
    for id in 1..=5 {
        airspace.insert_test_aircraft(aircraft(id, 500.0, 900.0, 0.0, FlightState::Landed));
    }
    airspace.tick(DT);
    let tick = airspace.time().tick;

    for _ in 0..100 {
        let snap = airspace.tick(DT);
        assert!(snap.events.is_empty());
    }
    assert_eq!(airspace.time().tick, tick);
}

#[test]
fn test_next_level_keeps_score() {
    let mut airspace = running_airspace();
    for id in 1..=5 {
        airspace.insert_test_aircraft(aircraft(id, 500.0, 900.0, 0.0, FlightState::Landed));
    }
    airspace.tick(DT);
    assert!(airspace.session().level_complete);

    airspace.queue_command(PlayerCommand::NextLevel);
    let snap = airspace.tick(DT);
    assert_eq!(snap.level.current, 2);
    assert_eq!(snap.level.total, 8);
    assert_eq!(snap.level.spawned, 0);
    assert_eq!(snap.score.score, 500);
    assert_eq!(snap.score.landed, 5);
    assert!(!snap.level_complete);
    assert!(snap.running);
}

#[test]
fn test_next_level_ignored_mid_level() {
    let mut airspace = running_airspace();
    airspace.queue_command(PlayerCommand::NextLevel);
    let snap = airspace.tick(DT);
    assert_eq!(snap.level.current, 1);
}

#[test]
fn test_advancing_past_last_level_ends_campaign() {
    let mut airspace = running_airspace();
    airspace.session_mut().level = 5;
    airspace.session_mut().level_complete = true;

    airspace.queue_command(PlayerCommand::NextLevel);
    let snap = airspace.tick(DT);
    assert!(snap.game_over);
    assert!(!snap.level_complete);
    assert_eq!(snap.level.current, 5);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CampaignComplete { .. })));
}

#[test]
fn test_levels_past_table_use_last_entry() {
    let mut airspace = running_airspace();
    airspace.session_mut().level = 9;
    assert_eq!(airspace.level_config().total, 20);
    assert_eq!(airspace.snapshot().level.score_min, 6000);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_in_spawn_order() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(3, 300.0, 300.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(1, 700.0, 300.0, 3000.0, FlightState::Flying));
    airspace.insert_test_aircraft(aircraft(2, 300.0, 700.0, 3000.0, FlightState::Flying));

    let snap = airspace.snapshot();
    let order: Vec<_> = snap.aircraft.iter().map(|a| a.callsign.as_str()).collect();
    assert_eq!(order, ["T001", "T002", "T003"]);
}

#[test]
fn test_events_drained_once() {
    let mut airspace = running_airspace();
    airspace.insert_test_aircraft(aircraft(1, 500.0, 900.0, 0.0, FlightState::Landed));

    let first = airspace.tick(DT);
    assert!(!first.events.is_empty());
    let second = airspace.tick(DT);
    assert!(second.events.is_empty());
}

#[test]
fn test_config_from_json_defaults() {
    let config = SimConfig::from_json(r#"{"seed": 7}"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.levels.max_level(), 5);
    assert_eq!(config.geometry.runway_threshold, Position::new(500.0, 900.0));

    assert!(SimConfig::from_json(r#"{"levels": []}"#).is_err());
}
