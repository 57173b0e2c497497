use glam::{Vec2, Vec3};
use handmorph_core::config::{GestureConfig, HAND_LANDMARKS};
use handmorph_core::gesture::{scale_from_distance, two_hand_scale, GestureClassifier};
use handmorph_core::{GestureError, HandLandmarks};

fn open_hand(knuckle: Vec2) -> HandLandmarks {
    let mut points = [(knuckle - Vec2::new(0.0, 0.1)).extend(0.0); HAND_LANDMARKS];
    points[9] = knuckle.extend(0.0);
    points[12] = (knuckle + Vec2::new(0.0, 0.12)).extend(0.0);
    HandLandmarks::new(points)
}

fn fist(knuckle: Vec2) -> HandLandmarks {
    let mut points = [(knuckle - Vec2::new(0.0, 0.1)).extend(0.0); HAND_LANDMARKS];
    points[9] = knuckle.extend(0.0);
    points[12] = (knuckle - Vec2::new(0.0, 0.03)).extend(0.0);
    HandLandmarks::new(points)
}

#[test]
fn test_scale_clamped_below_range() {
    let config = GestureConfig::default();
    for d in [0.0, 0.05, 0.1, 0.19] {
        assert_eq!(scale_from_distance(d, &config), 0.5, "distance {}", d);
    }
}

#[test]
fn test_scale_linear_inside_range() {
    let config = GestureConfig::default();
    assert!((scale_from_distance(0.2, &config) - 0.5).abs() < 1e-6);
    assert!((scale_from_distance(0.5, &config) - 1.5).abs() < 1e-5);
    assert!((scale_from_distance(0.8, &config) - 2.5).abs() < 1e-5);
    let a = scale_from_distance(0.3, &config);
    let b = scale_from_distance(0.4, &config);
    let c = scale_from_distance(0.5, &config);
    assert!(((b - a) - (c - b)).abs() < 1e-5);
}

#[test]
fn test_scale_extrapolates_then_clamps_at_three() {
    let config = GestureConfig::default();
    // the remap runs past 0.8 until the 3.0 clamp
    assert!((scale_from_distance(0.9, &config) - 2.8333333).abs() < 1e-4);
    assert_eq!(scale_from_distance(1.2, &config), 3.0);
    assert_eq!(scale_from_distance(5.0, &config), 3.0);
}

#[test]
fn test_scale_ignores_depth() {
    let config = GestureConfig::default();
    let a = open_hand(Vec2::new(0.2, 0.5));
    let mut far = *open_hand(Vec2::new(0.7, 0.5)).points();
    for p in far.iter_mut() {
        p.z = -3.0;
    }
    let b = HandLandmarks::new(far);
    assert!((two_hand_scale(&a, &b, &config) - 1.5).abs() < 1e-5);
}

#[test]
fn test_only_rising_edge_explodes() {
    let mut classifier = GestureClassifier::new(GestureConfig::default());
    let closed = [fist(Vec2::new(0.3, 0.5)), fist(Vec2::new(0.6, 0.5))];
    let open = [open_hand(Vec2::new(0.3, 0.5)), open_hand(Vec2::new(0.6, 0.5))];
    let one_closed = [fist(Vec2::new(0.3, 0.5)), open_hand(Vec2::new(0.6, 0.5))];

    let sequence = [
        (&closed, true),
        (&closed, false),
        (&one_closed, false),
        (&closed, true),
        (&open, false),
        (&open, false),
        (&closed, true),
    ];
    for (i, (hands, expect)) in sequence.iter().enumerate() {
        let frame = classifier.classify(Some(&hands[..]));
        assert_eq!(frame.explode, *expect, "frame {}", i);
        assert_eq!(frame.hands, 2);
        assert!(frame.scale.is_some());
    }
}

#[test]
fn test_wrong_hand_count_yields_no_scale() {
    let mut classifier = GestureClassifier::new(GestureConfig::default());
    let three = [
        fist(Vec2::new(0.1, 0.5)),
        fist(Vec2::new(0.5, 0.5)),
        fist(Vec2::new(0.9, 0.5)),
    ];
    let frame = classifier.classify(Some(&three[..]));
    assert!(frame.tracked);
    assert_eq!(frame.hands, 3);
    assert_eq!(frame.scale, None);
    assert_eq!(frame.both_closed, None);
    assert!(!frame.explode);
}

#[test]
fn test_from_flat_layout() {
    let mut values = vec![0.0f32; HAND_LANDMARKS * 3 * 2];
    // hand 1, landmark 9
    let base = HAND_LANDMARKS * 3 + 9 * 3;
    values[base..base + 3].copy_from_slice(&[0.4, 0.6, -0.1]);
    let hands = HandLandmarks::from_flat(&values, 2).unwrap();
    assert_eq!(hands[1].points()[9], Vec3::new(0.4, 0.6, -0.1));
    assert_eq!(hands[1].planar(9), Vec2::new(0.4, 0.6));
    assert_eq!(hands[0].points()[9], Vec3::ZERO);

    assert_eq!(
        HandLandmarks::from_flat(&values, 3).unwrap_err(),
        GestureError::FlatBufferLength {
            len: values.len(),
            hands: 3
        }
    );
}
