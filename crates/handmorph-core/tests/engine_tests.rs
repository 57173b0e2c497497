use glam::{Vec2, Vec3};
use handmorph_core::config::HAND_LANDMARKS;
use handmorph_core::{ColorError, Engine, EngineConfig, HandLandmarks, Mode, Rgb, Template};

const DT: f32 = 1.0 / 60.0;

fn engine(count: usize, seed: u64) -> Engine {
    Engine::with_seed(EngineConfig::with_particle_count(count), seed).unwrap()
}

/// Hand with the knuckle at `knuckle`; a closed hand curls the middle tip
/// back toward the wrist.
fn hand(knuckle: Vec2, closed: bool) -> HandLandmarks {
    let wrist = knuckle - Vec2::new(0.0, 0.1);
    let tip = if closed {
        knuckle - Vec2::new(0.0, 0.02)
    } else {
        knuckle + Vec2::new(0.0, 0.12)
    };
    let mut points = [wrist.extend(0.0); HAND_LANDMARKS];
    points[9] = knuckle.extend(0.0);
    points[12] = tip.extend(0.0);
    HandLandmarks::new(points)
}

fn two_hands(closed: bool) -> [HandLandmarks; 2] {
    [hand(Vec2::new(0.25, 0.5), closed), hand(Vec2::new(0.75, 0.5), closed)]
}

/// Tick until the engine leaves its transition, with a safety cap.
fn run_until_steady(engine: &mut Engine, max_ticks: usize) -> usize {
    for i in 0..max_ticks {
        if !engine.is_transitioning() {
            return i;
        }
        engine.tick(DT, None);
    }
    max_ticks
}

#[test]
fn test_starts_at_rest_on_heart() {
    let engine = engine(500, 1);
    assert_eq!(engine.template(), Template::Heart);
    assert_eq!(engine.mode(), Mode::SteadyPhysics);
    assert_eq!(engine.positions(), engine.targets());
    assert!(engine.velocities().iter().all(|v| *v == Vec3::ZERO));
    assert_eq!(engine.scale(), 1.0);
    assert_eq!(engine.hands_detected(), 0);
}

#[test]
fn test_zero_particles_rejected() {
    assert!(Engine::with_seed(EngineConfig::with_particle_count(0), 1).is_err());
}

#[test]
fn test_morph_lands_on_new_targets() {
    let mut engine = engine(400, 2);
    assert!(engine.select_template(Template::Saturn));
    assert_eq!(engine.mode(), Mode::Morphing);
    assert!(engine.velocities().iter().all(|v| *v == Vec3::ZERO));

    let ticks = run_until_steady(&mut engine, 200);
    assert!(ticks >= 89 && ticks <= 92, "1.5s morph took {} ticks", ticks);
    assert_eq!(engine.mode(), Mode::SteadyPhysics);
    for (p, t) in engine.positions().iter().zip(engine.targets()) {
        assert!(p.distance(*t) < 1e-4, "particle {:?} not on target {:?}", p, t);
    }
}

#[test]
fn test_morph_onto_own_positions_is_stationary() {
    let mut engine = engine(300, 3);
    engine.halt();
    let before = engine.positions().to_vec();
    engine.resume();
    assert_eq!(engine.mode(), Mode::Morphing);
    for _ in 0..30 {
        engine.tick(DT, None);
        for (p, b) in engine.positions().iter().zip(&before) {
            assert!(p.distance(*b) < 1e-5);
        }
    }
}

#[test]
fn test_reselecting_template_is_noop() {
    let mut engine = engine(300, 4);
    for _ in 0..10 {
        engine.tick(DT, None);
    }
    let positions = engine.positions().to_vec();
    let velocities = engine.velocities().to_vec();
    let targets = engine.targets().to_vec();

    assert!(!engine.select_template(Template::Heart));
    assert_eq!(engine.mode(), Mode::SteadyPhysics);
    assert_eq!(engine.positions(), positions.as_slice());
    assert_eq!(engine.velocities(), velocities.as_slice());
    assert_eq!(engine.targets(), targets.as_slice());
}

#[test]
fn test_reselecting_mid_morph_keeps_running_morph() {
    let mut engine = engine(300, 5);
    engine.select_template(Template::Flower);
    for _ in 0..20 {
        engine.tick(DT, None);
    }
    let targets = engine.targets().to_vec();
    assert!(!engine.select_template(Template::Flower));
    assert_eq!(engine.mode(), Mode::Morphing);
    assert_eq!(engine.targets(), targets.as_slice());
}

#[test]
fn test_switch_mid_morph_replaces_it() {
    let mut engine = engine(300, 6);
    engine.select_template(Template::Flower);
    for _ in 0..30 {
        engine.tick(DT, None);
    }
    engine.select_template(Template::Buddha);
    assert_eq!(engine.mode(), Mode::Morphing);
    let ticks = run_until_steady(&mut engine, 200);
    // full duration again from the switch
    assert!(ticks >= 89, "replacement morph ended after {} ticks", ticks);
    for (p, t) in engine.positions().iter().zip(engine.targets()) {
        assert!(p.distance(*t) < 1e-4);
    }
}

#[test]
fn test_closed_fists_trigger_exactly_once() {
    let mut engine = engine(300, 7);
    let closed = two_hands(true);
    let open = two_hands(false);

    let mut triggers = 0;
    for frame in 1..=10 {
        let hands = if frame <= 5 { &closed } else { &open };
        if engine.tick(DT, Some(hands)).explode {
            triggers += 1;
            assert_eq!(frame, 1);
        }
    }
    assert_eq!(triggers, 1);
    assert_eq!(engine.mode(), Mode::Exploding);
    assert_eq!(engine.hands_detected(), 2);
}

#[test]
fn test_explosion_returns_to_anchors() {
    let mut engine = engine(300, 8);
    let anchors = engine.targets().to_vec();
    assert!(engine.trigger_explosion());
    assert_eq!(engine.material().color, Rgb::WHITE);

    let mut max_dist = 0.0f32;
    for _ in 0..200 {
        if !engine.is_transitioning() {
            break;
        }
        engine.tick(DT, None);
        let d = engine.positions()[0].distance(anchors[0]);
        max_dist = max_dist.max(d);
    }
    assert_eq!(engine.mode(), Mode::SteadyPhysics);
    assert!(max_dist > 15.0, "particles never flew out: {}", max_dist);
    for (p, a) in engine.positions().iter().zip(&anchors) {
        assert!(p.distance(*a) < 1e-3);
    }
    // flash is shorter than the explosion
    assert_eq!(engine.material().color, engine.color());
}

#[test]
fn test_explosion_refused_while_transitioning() {
    let mut engine = engine(300, 9);
    engine.select_template(Template::Flower);
    engine.tick(DT, None);
    let positions = engine.positions().to_vec();
    let material = *engine.material();

    assert!(!engine.trigger_explosion());
    assert_eq!(engine.mode(), Mode::Morphing);
    assert_eq!(engine.positions(), positions.as_slice());
    assert_eq!(*engine.material(), material);

    run_until_steady(&mut engine, 200);
    assert!(engine.trigger_explosion());
    assert!(!engine.trigger_explosion(), "second trigger during a running explosion");
}

#[test]
fn test_explosion_refused_in_fireworks() {
    let mut engine = engine(300, 10);
    engine.select_template(Template::Fireworks);
    assert_eq!(engine.mode(), Mode::Fireworks);
    engine.tick(DT, None);
    let positions = engine.positions().to_vec();

    assert!(!engine.trigger_explosion());
    let frame = engine.tick(0.0, Some(&two_hands(true)));
    assert!(frame.explode, "gesture still reported");
    assert_eq!(engine.mode(), Mode::Fireworks);
    assert_ne!(engine.positions(), positions.as_slice(), "fireworks kept stepping");
}

#[test]
fn test_template_switch_cancels_explosion() {
    let mut engine = engine(300, 11);
    engine.trigger_explosion();
    for _ in 0..5 {
        engine.tick(DT, None);
    }
    engine.select_template(Template::Heart);
    assert_eq!(engine.mode(), Mode::Exploding, "same template leaves the explosion alone");

    engine.select_template(Template::Saturn);
    assert_eq!(engine.mode(), Mode::Morphing);
    run_until_steady(&mut engine, 200);
    for (p, t) in engine.positions().iter().zip(engine.targets()) {
        assert!(p.distance(*t) < 1e-4);
    }
}

#[test]
fn test_fireworks_to_shape_morphs_back() {
    let mut engine = engine(200, 12);
    engine.select_template(Template::Fireworks);
    for _ in 0..40 {
        engine.tick(DT, None);
    }
    assert!(engine.fireworks().is_some());
    engine.select_template(Template::Flower);
    assert!(engine.fireworks().is_none());
    assert_eq!(engine.mode(), Mode::Morphing);
    run_until_steady(&mut engine, 200);
    for (p, t) in engine.positions().iter().zip(engine.targets()) {
        assert!(p.distance(*t) < 1e-3);
    }
}

#[test]
fn test_two_hand_scale_smoothed() {
    let mut engine = engine(100, 13);
    // knuckles 0.8 apart: scale 2.5
    let hands = [hand(Vec2::new(0.1, 0.5), false), hand(Vec2::new(0.9, 0.5), false)];
    let frame = engine.tick(DT, Some(&hands));
    assert!((frame.scale.unwrap() - 2.5).abs() < 1e-4);
    assert!(engine.scale() > 1.0 && engine.scale() < 2.5, "scale jumped: {}", engine.scale());

    for _ in 0..30 {
        engine.tick(DT, None);
    }
    assert!((engine.scale() - 2.5).abs() < 1e-5);
}

#[test]
fn test_hands_detected_follows_tracked_frames() {
    let mut engine = engine(100, 14);
    engine.tick(DT, Some(&two_hands(false)));
    assert_eq!(engine.hands_detected(), 2);
    engine.tick(DT, None);
    assert_eq!(engine.hands_detected(), 2, "untracked frame keeps the last count");
    engine.tick(DT, Some(&[]));
    assert_eq!(engine.hands_detected(), 0);
}

#[test]
fn test_halt_freezes_and_resume_morphs() {
    let mut engine = engine(200, 15);
    engine.select_template(Template::Buddha);
    for _ in 0..20 {
        engine.tick(DT, None);
    }
    engine.halt();
    assert_eq!(engine.mode(), Mode::Idle);
    let frozen = engine.positions().to_vec();
    for _ in 0..10 {
        let frame = engine.tick(DT, Some(&two_hands(true)));
        assert!(!frame.explode);
    }
    assert_eq!(engine.positions(), frozen.as_slice());
    assert!(!engine.trigger_explosion());

    engine.resume();
    assert_eq!(engine.mode(), Mode::Morphing);
    run_until_steady(&mut engine, 200);
    for (p, t) in engine.positions().iter().zip(engine.targets()) {
        assert!(p.distance(*t) < 1e-4);
    }
}

#[test]
fn test_set_color_hex() {
    let mut engine = engine(50, 16);
    engine.set_color_hex("#00ff00").unwrap();
    assert_eq!(engine.color(), Rgb::new(0.0, 1.0, 0.0));
    assert_eq!(engine.material().color, Rgb::new(0.0, 1.0, 0.0));

    let err = engine.set_color_hex("green").unwrap_err();
    assert_eq!(err, ColorError::InvalidHex("green".to_string()));
    assert_eq!(engine.color(), Rgb::new(0.0, 1.0, 0.0));
}

#[test]
fn test_color_change_mid_flash_lands_on_new_color() {
    let mut engine = engine(50, 17);
    engine.trigger_explosion();
    for _ in 0..10 {
        engine.tick(DT, None);
    }
    engine.set_color(Rgb::new(0.0, 0.0, 1.0));
    for _ in 0..40 {
        engine.tick(DT, None);
    }
    assert_eq!(engine.material().color, Rgb::new(0.0, 0.0, 1.0));
    assert_eq!(engine.material().size, engine.config().material.size);
}

#[test]
fn test_same_seed_same_frames() {
    let mut a = engine(200, 99);
    let mut b = engine(200, 99);
    for e in [&mut a, &mut b] {
        e.select_template(Template::Saturn);
        for _ in 0..100 {
            e.tick(DT, None);
        }
        e.trigger_explosion();
        for _ in 0..20 {
            e.tick(DT, None);
        }
    }
    assert_eq!(a.positions(), b.positions());
}

#[test]
fn test_reinitialize_snaps_to_fresh_cloud() {
    let mut engine = engine(200, 18);
    engine.trigger_explosion();
    engine.tick(DT, None);
    let old_targets = engine.targets().to_vec();

    engine.reinitialize(1234);
    assert_eq!(engine.mode(), Mode::SteadyPhysics);
    assert_eq!(engine.positions(), engine.targets());
    assert_ne!(engine.targets(), old_targets.as_slice());
    assert_eq!(engine.material().color, engine.color());
}

#[test]
fn test_reinitialize_drops_scale_tween_and_gesture_memory() {
    let mut engine = engine(100, 19);
    let closed_wide = [hand(Vec2::new(0.1, 0.5), true), hand(Vec2::new(0.9, 0.5), true)];
    assert!(engine.tick(DT, Some(&closed_wide)).explode);
    let scale = engine.scale();
    assert!(scale > 1.0 && scale < 2.5);

    engine.reinitialize(7);
    for _ in 0..30 {
        engine.tick(DT, None);
    }
    assert_eq!(engine.scale(), scale, "scale tween should not resume after reinitialize");

    // edge memory cleared: the still-closed fists count as a fresh close
    assert!(engine.tick(DT, Some(&closed_wide)).explode);
    assert_eq!(engine.mode(), Mode::Exploding);
}
