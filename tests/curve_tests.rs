use flexrod::{BladeCurve, ElasticProperties, Rod, Vec3};
use flexrod::Vec;

fn bent_rod(grip_ratio: f64, taper: f64) -> Rod<f64> {
    let props = ElasticProperties::default().with_grip_ratio(grip_ratio).with_taper(taper);
    let mut rod = Rod::new(100.0, props, Vec3::new(1.0, 2.0, 3.0), Vec3::unit_y());
    for _ in 0..20 {
        rod.advance(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.2, 0.0), 1.0 / 60.0);
    }
    rod
}

#[test]
fn query_at_one_is_tip() {
    let rod = bent_rod(0.3, 0.5);
    assert_eq!(rod.query_normalized_position(1.0), rod.tip_position());
}

#[test]
fn query_at_grip_is_handle() {
    let rod = bent_rod(0.3, 0.5);
    assert_eq!(rod.query_normalized_position(0.3), rod.handle_position());
}

#[test]
fn query_at_zero_without_grip_is_handle() {
    let rod = bent_rod(0.0, 0.0);
    assert_eq!(rod.query_normalized_position(0.0), rod.handle_position());
}

#[test]
fn pommel_extends_behind_handle() {
    let rod = bent_rod(0.25, 0.0);
    let pommel = rod.query_normalized_position(0.0);
    let expected = rod.handle_position() - rod.handle_direction().scale(25.0);
    assert!(pommel.distance(expected) < 1e-9);

    let mid = rod.query_normalized_position(0.125);
    assert!((mid.distance(rod.handle_position()) - 12.5).abs() < 1e-9);
}

#[test]
fn query_is_read_only_and_deterministic() {
    let rod = bent_rod(0.1, 0.7);
    let state = rod.tip_state();
    let a = rod.query_normalized_position(0.6);
    let b = rod.query_normalized_position(0.6);
    assert_eq!(a, b);
    assert_eq!(rod.tip_state(), state);
}

#[test]
fn sample_curve_spans_pommel_to_tip() {
    let rod = bent_rod(0.2, 0.3);
    let samples = rod.sample_curve(31);
    assert_eq!(samples.len(), 31);
    assert_eq!(samples[0], rod.query_normalized_position(0.0));
    assert_eq!(samples[30], rod.tip_position());
    assert!(samples.iter().all(|p| p.is_finite()));
}

#[test]
fn sample_curve_small_counts() {
    let rod = bent_rod(0.0, 0.0);
    assert!(rod.sample_curve(0).is_empty());
    assert_eq!(rod.sample_curve(1), vec![rod.tip_position()]);
}

#[test]
fn landmarks_match_queries() {
    let rod = bent_rod(0.2, 0.0);
    let marks = rod.landmarks();
    assert_eq!(marks.pommel, rod.query_normalized_position(0.0));
    assert_eq!(marks.grip, rod.handle_position());
    assert_eq!(marks.tip, rod.tip_position());
}

#[test]
fn degenerate_rod_queries_collapse_to_handle() {
    let props = ElasticProperties::default().with_grip_ratio(0.95);
    let rod: Rod<f64> = Rod::new(1.0, props, Vec3::new(0.0, 1.0, 0.0), Vec3::unit_x());
    assert_eq!(rod.query_normalized_position(0.97), rod.handle_position());
    assert_eq!(rod.query_normalized_position(1.0), rod.handle_position());
}

#[test]
fn rod_curve_uses_current_state() {
    let rod = bent_rod(0.0, 0.4);
    let curve: BladeCurve<f64> = rod.curve();
    assert_eq!(curve.p0, rod.handle_position());
    assert_eq!(curve.p3, rod.tip_position());
    assert_eq!(curve.evaluate(0.5), rod.query_normalized_position(0.5));
}
