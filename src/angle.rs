//! Conversions between wall-clock values and hand angles.
//!
//! Angles are radians measured clockwise from the 12 o'clock position. The
//! quarter-turn offset needed for screen space is applied only when laying
//! out or painting a hand.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Radians covered by one minute on the hour dial (12h = 720 minutes per turn).
pub const RAD_PER_DIAL_MINUTE: f32 = TAU / 720.0;

/// Radians covered by one minute on the minute dial.
pub const RAD_PER_MINUTE: f32 = TAU / 60.0;

/// Minutes in one full turn of the hour hand.
pub const MINUTES_PER_TURN: u32 = 720;

// Whole-unit angles come back a hair below the integer after a round trip
// through f32, which `floor` would otherwise turn into an off-by-one.
const SNAP: f32 = 1e-4;

/// Direction in which a hand passed through the 12 o'clock position between
/// two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    None,
    Forward,
    Backward,
}

/// Normalise an angle to the half-open range [0, 2π).
///
/// Non-finite input maps to 0 so callers never propagate NaN into hand state.
pub fn normalize(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Angle of the hour hand for `hour` (0..=23) and `minute`.
///
/// Hours above 12 fold onto the 12-hour dial. The result is not normalised:
/// `hour == 12` yields a full turn.
pub fn hour_angle(hour: u32, minute: u32) -> f32 {
    let hour = if hour > 12 { hour - 12 } else { hour };
    RAD_PER_DIAL_MINUTE * (hour * 60 + minute) as f32
}

pub fn minute_angle(minute: u32) -> f32 {
    RAD_PER_MINUTE * minute as f32
}

/// Angle of the duration hand: `duration` minutes forward of the hour hand.
pub fn duration_angle(hour_angle: f32, duration: u32) -> f32 {
    normalize(hour_angle + RAD_PER_DIAL_MINUTE * (duration % MINUTES_PER_TURN) as f32)
}

/// Signed delta between two angles.
///
/// When the raw difference spans more than half a turn its sign is flipped, so
/// the sign always reports the direction of the shorter arc. The magnitude is
/// not corrected; only the sign is meaningful.
pub fn angular_delta(current: f32, previous: f32) -> f32 {
    let delta = current - previous;
    if delta.abs() > PI { -delta } else { delta }
}

/// Classify the motion from `previous` to `current` (both normalised).
///
/// Moving clockwise past 12 makes the angle drop while the short arc points
/// forward; moving back past 12 does the opposite.
pub fn crossing(previous: f32, current: f32) -> Crossing {
    let delta = angular_delta(current, previous);
    if delta > 0.0 && previous > current {
        Crossing::Forward
    } else if delta < 0.0 && previous < current {
        Crossing::Backward
    } else {
        Crossing::None
    }
}

/// Hour (0..=23) shown by an hour hand at `angle`, given which half of the day
/// the clock is in.
pub fn hour_from_angle(angle: f32, is_am: bool) -> u32 {
    let hours = (normalize(angle) * (12.0 / TAU) + SNAP).floor() as u32 % 12;
    if is_am { hours } else { hours + 12 }
}

/// Minute (0..=59) shown by a minute hand at `angle`.
pub fn minute_from_angle(angle: f32) -> u32 {
    (normalize(angle) * (60.0 / TAU) + SNAP).floor() as u32 % 60
}

/// Forward minutes from the hour hand to the duration hand, rounded to the
/// nearest minute.
pub fn duration_from_angles(hour_angle: f32, duration_angle: f32) -> u32 {
    let hour = normalize(hour_angle);
    let mut duration = normalize(duration_angle);
    while duration < hour {
        duration += TAU;
    }
    ((duration - hour) * (MINUTES_PER_TURN as f32 / TAU)).round() as u32
}

/// Angle of the line from `center` to `(x, y)`, rotated so that straight up
/// is 0.
pub fn pointer_angle(center: (f32, f32), x: f32, y: f32) -> f32 {
    (y - center.1).atan2(x - center.0) + FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_stays_in_range_and_is_idempotent() {
        for a in [-1e-8, -TAU, -7.5, -0.1, 0.0, 0.1, PI, TAU, 7.5, 1e6, -1e6] {
            let n = normalize(a);
            assert!((0.0..TAU).contains(&n), "normalize({a}) = {n}");
            assert_eq!(normalize(n), n);
        }
        assert_eq!(normalize(f32::NAN), 0.0);
    }

    #[test]
    fn hour_angle_round_trips_with_am_flag() {
        for hour in 0..24 {
            for minute in 0..60 {
                let angle = hour_angle(hour, minute);
                assert_eq!(hour_from_angle(angle, hour < 12), hour, "{hour}:{minute}");
            }
        }
    }

    #[test]
    fn minute_angle_round_trips() {
        for minute in 0..60 {
            assert_eq!(minute_from_angle(minute_angle(minute)), minute);
        }
    }

    #[test]
    fn duration_angle_recovers_minutes() {
        for hour in [0, 5, 11, 12, 17, 23] {
            let start = hour_angle(hour, 37);
            for minutes in 0..720 {
                let angle = duration_angle(start, minutes);
                assert_eq!(duration_from_angles(start, angle), minutes);
            }
        }
    }

    #[test]
    fn delta_sign_follows_short_arc() {
        assert!(angular_delta(0.2, 0.1) > 0.0);
        assert!(angular_delta(0.1, 0.2) < 0.0);
        assert!(angular_delta(0.1, TAU - 0.1) > 0.0);
        assert!(angular_delta(TAU - 0.1, 0.1) < 0.0);
    }

    #[test]
    fn crossing_detects_passing_twelve() {
        assert_eq!(crossing(TAU - 0.05, 0.05), Crossing::Forward);
        assert_eq!(crossing(0.05, TAU - 0.05), Crossing::Backward);
        assert_eq!(crossing(1.0, 1.1), Crossing::None);
        assert_eq!(crossing(1.1, 1.0), Crossing::None);
        // passing six o'clock is not a crossing
        assert_eq!(crossing(PI - 0.05, PI + 0.05), Crossing::None);
    }

    #[test]
    fn pointer_straight_up_is_zero() {
        let a = pointer_angle((100.0, 100.0), 100.0, 20.0);
        assert!(normalize(a).abs() < 1e-6);
        let right = pointer_angle((100.0, 100.0), 180.0, 100.0);
        assert!((right - FRAC_PI_2).abs() < 1e-6);
    }
}
