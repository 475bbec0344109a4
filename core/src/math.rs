use core::f64::consts::PI;

use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH};

/// Maps an angle into (-PI, PI].
pub fn normalize_angle(angle: f64) -> f64 {
    let mut normalized = angle;
    while normalized > PI {
        normalized -= 2.0 * PI;
    }
    while normalized <= -PI {
        normalized += 2.0 * PI;
    }
    normalized
}

#[inline]
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Heading from one point to another, in radians.
#[inline]
pub fn heading_between(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> f64 {
    (to_y - from_y).atan2(to_x - from_x)
}

/// Teleports past-the-edge positions to the opposite edge. Positions exactly
/// on an edge are left alone, so wrapping is idempotent at the boundary.
#[inline]
pub fn wrap_x(x: f64) -> f64 {
    if x < 0.0 {
        FIELD_WIDTH
    } else if x > FIELD_WIDTH {
        0.0
    } else {
        x
    }
}

#[inline]
pub fn wrap_y(y: f64) -> f64 {
    if y < 0.0 {
        FIELD_HEIGHT
    } else if y > FIELD_HEIGHT {
        0.0
    } else {
        y
    }
}

/// Rescales a velocity onto the speed cap, preserving direction. A zero
/// velocity is returned untouched so the rescale never divides by zero.
pub fn clamp_speed(vx: f64, vy: f64, max_speed: f64) -> (f64, f64) {
    let speed = (vx * vx + vy * vy).sqrt();
    if speed <= max_speed || speed == 0.0 {
        return (vx, vy);
    }
    (vx / speed * max_speed, vy / speed * max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_angle_maps_into_half_open_range() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(2.0 * PI)).abs() < 1e-12);
        assert!((normalize_angle(-0.25) + 0.25).abs() < 1e-12);
    }

    #[test]
    fn wrap_is_idempotent_on_the_boundary() {
        assert_eq!(wrap_x(0.0), 0.0);
        assert_eq!(wrap_x(FIELD_WIDTH), FIELD_WIDTH);
        assert_eq!(wrap_x(-0.5), FIELD_WIDTH);
        assert_eq!(wrap_x(FIELD_WIDTH + 0.5), 0.0);
        assert_eq!(wrap_y(0.0), 0.0);
        assert_eq!(wrap_y(FIELD_HEIGHT), FIELD_HEIGHT);
        assert_eq!(wrap_y(-1.0), FIELD_HEIGHT);
        assert_eq!(wrap_y(FIELD_HEIGHT + 1.0), 0.0);
    }

    #[test]
    fn clamp_speed_preserves_direction_and_skips_zero() {
        let (vx, vy) = clamp_speed(6.0, 8.0, 5.0);
        assert!((vx - 3.0).abs() < 1e-12);
        assert!((vy - 4.0).abs() < 1e-12);

        assert_eq!(clamp_speed(0.0, 0.0, 5.0), (0.0, 0.0));
        assert_eq!(clamp_speed(1.0, -2.0, 5.0), (1.0, -2.0));
    }
}
