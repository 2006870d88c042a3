use std::f32::consts::FRAC_PI_2;

use iced::Point;

use crate::angle::normalize;

/// The three draggable hands of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    Hour,
    Minute,
    Duration,
}

impl HandKind {
    /// Hands in hit-testing order.
    pub const ALL: [HandKind; 3] = [HandKind::Hour, HandKind::Minute, HandKind::Duration];

    /// Length of the hand as a fraction of the dial radius.
    pub fn length_ratio(self) -> f32 {
        match self {
            HandKind::Hour => 0.4,
            HandKind::Minute => 0.8,
            HandKind::Duration => 0.6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hand {
    pub kind: HandKind,
    /// Current angle, 0 at 12 o'clock. May leave [0, 2π) between a pointer
    /// sample and the next normalisation.
    pub angle: f32,
    /// Normalised angle at the previous sample, for wraparound detection.
    pub last_angle: f32,
    /// Render distance of the tip from the dial center.
    pub radius: f32,
    /// Screen position of the tip, refreshed whenever the dial is laid out.
    pub position: Point,
}

impl Hand {
    fn new(kind: HandKind) -> Self {
        Self {
            kind,
            angle: 0.0,
            last_angle: 0.0,
            radius: 0.0,
            position: Point::ORIGIN,
        }
    }

    /// Set the angle from clock values and forget the previous sample.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.last_angle = normalize(angle);
    }

    /// Screen-space tip for the current angle around `center`.
    pub fn tip(&self, center: Point) -> Point {
        let screen_angle = self.angle - FRAC_PI_2;
        Point::new(
            center.x + screen_angle.cos() * self.radius,
            center.y + screen_angle.sin() * self.radius,
        )
    }
}

/// The fixed set of hands owned by one clock.
#[derive(Debug, Clone)]
pub struct Hands {
    pub hour: Hand,
    pub minute: Hand,
    pub duration: Hand,
}

impl Default for Hands {
    fn default() -> Self {
        Self {
            hour: Hand::new(HandKind::Hour),
            minute: Hand::new(HandKind::Minute),
            duration: Hand::new(HandKind::Duration),
        }
    }
}

impl Hands {
    pub fn get(&self, kind: HandKind) -> &Hand {
        match kind {
            HandKind::Hour => &self.hour,
            HandKind::Minute => &self.minute,
            HandKind::Duration => &self.duration,
        }
    }

    pub fn get_mut(&mut self, kind: HandKind) -> &mut Hand {
        match kind {
            HandKind::Hour => &mut self.hour,
            HandKind::Minute => &mut self.minute,
            HandKind::Duration => &mut self.duration,
        }
    }

    /// Scale every hand to its share of `dial_radius`.
    pub fn set_dial_radius(&mut self, dial_radius: f32) {
        for kind in HandKind::ALL {
            let hand = self.get_mut(kind);
            hand.radius = dial_radius * kind.length_ratio();
        }
    }

    /// Recompute every tip position around `center`.
    pub fn layout(&mut self, center: Point) {
        for kind in HandKind::ALL {
            let hand = self.get_mut(kind);
            hand.position = hand.tip(center);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn radii_follow_dial() {
        let mut hands = Hands::default();
        hands.set_dial_radius(100.0);
        assert!((hands.hour.radius - 40.0).abs() < 1e-4);
        assert!((hands.minute.radius - 80.0).abs() < 1e-4);
        assert!((hands.duration.radius - 60.0).abs() < 1e-4);
    }

    #[test]
    fn tip_points_up_at_zero_and_down_at_half_turn() {
        let mut hands = Hands::default();
        hands.set_dial_radius(100.0);
        hands.minute.set_angle(0.0);
        hands.hour.set_angle(PI);
        hands.layout(Point::new(50.0, 50.0));

        assert!((hands.minute.position.x - 50.0).abs() < 1e-4);
        assert!((hands.minute.position.y + 30.0).abs() < 1e-4);
        assert!((hands.hour.position.x - 50.0).abs() < 1e-4);
        assert!((hands.hour.position.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn set_angle_syncs_last_sample() {
        let mut hand = Hand::new(HandKind::Hour);
        hand.set_angle(-PI / 2.0);
        assert!((hand.last_angle - 3.0 * PI / 2.0).abs() < 1e-5);
    }
}
