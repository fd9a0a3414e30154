//! Physical properties of the range formula.
//!
//! Sweeps speed/angle grids rather than single points, since the formula is
//! cheap and the interesting failures (wrong units, wrong factor of two) show
//! up across the whole range.

use projectile_mcp::projectile::{calculate_projectile, compute_projectile_distance, GRAVITY};

/// Helper to compare floats with tolerance.
fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

const SPEEDS: [f64; 6] = [0.0, 0.5, 1.0, 9.81, 25.0, 340.0];

fn angles() -> impl Iterator<Item = f64> {
    (0..=180).map(|half_degree| f64::from(half_degree) * 0.5)
}

#[test]
fn test_matches_closed_form() {
    for speed in SPEEDS {
        for angle in angles() {
            let expected = speed * speed * (2.0 * angle.to_radians()).sin() / 9.81;
            let distance = calculate_projectile(speed, angle).unwrap();
            assert!(
                approx_eq(distance, expected, 1e-9 * expected.abs().max(1.0)),
                "speed {speed}, angle {angle}: {distance} != {expected}"
            );
        }
    }
}

#[test]
fn test_forty_five_degrees_maximises_range() {
    for speed in SPEEDS {
        let best = calculate_projectile(speed, 45.0).unwrap();
        for angle in angles() {
            let distance = calculate_projectile(speed, angle).unwrap();
            assert!(
                best >= distance,
                "speed {speed}: {angle}° gives {distance} > {best} at 45°"
            );
        }
    }
}

#[test]
fn test_flat_and_vertical_launch_land_at_origin() {
    for speed in SPEEDS {
        assert!(approx_eq(calculate_projectile(speed, 0.0).unwrap(), 0.0, 1e-9));
        // sin(π) is not exactly zero in floating point
        let vertical = calculate_projectile(speed, 90.0).unwrap();
        assert!(
            approx_eq(vertical, 0.0, 1e-9 * speed.powi(2).max(1.0)),
            "speed {speed}: vertical launch travelled {vertical}"
        );
    }
}

#[test]
fn test_complementary_angles_share_range() {
    for speed in SPEEDS {
        for angle in [10.0, 22.5, 30.0, 37.0] {
            let low = calculate_projectile(speed, angle).unwrap();
            let high = calculate_projectile(speed, 90.0 - angle).unwrap();
            assert!(approx_eq(low, high, 1e-9 * low.abs().max(1.0)));
        }
    }
}

#[test]
fn test_range_scales_with_speed_squared() {
    let base = calculate_projectile(10.0, 30.0).unwrap();
    let doubled = calculate_projectile(20.0, 30.0).unwrap();
    assert!(approx_eq(doubled, 4.0 * base, 1e-9));
}

#[test]
fn test_pinned_text_value() {
    // 10² · sin(90°) / 9.81 = 10.19367...
    assert!(approx_eq(
        calculate_projectile(10.0, 45.0).unwrap(),
        100.0 / GRAVITY,
        1e-12
    ));
    assert_eq!(
        compute_projectile_distance(10.0, 45.0),
        "Distance: 10.19 meters"
    );
}
