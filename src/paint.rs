//! Painting the dial through a minimal set of drawing primitives.

use std::f32::consts::FRAC_PI_2;

use iced::{Color, Point};

use crate::angle::normalize;
use crate::clock::TouchClock;
use crate::geometry::Geometry;
use crate::hand::{Hand, HandKind};
use crate::ticks::{TickConfig, compute_ticks};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Fill(Color),
    Stroke { color: Color, width: f32 },
}

/// Drawing surface the clock paints onto.
///
/// Angles are in screen space: radians clockwise from 3 o'clock.
pub trait Painter {
    /// Erase everything painted so far.
    fn clear(&mut self);

    fn circle(&mut self, center: Point, radius: f32, style: Style);

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Fill the pie slice starting at `start` and sweeping `sweep` radians
    /// clockwise.
    fn sector(&mut self, center: Point, radius: f32, start: f32, sweep: f32, color: Color);
}

impl TouchClock {
    /// Paint the dial, hands and duration sector for the current state.
    pub fn draw(&self, painter: &mut impl Painter) {
        self.draw_with(painter, self.geometry());
    }

    /// Paint using `geometry` instead of the clock's own, for hosts whose
    /// surface size is only known at paint time.
    pub fn draw_with(&self, painter: &mut impl Painter, geometry: &Geometry) {
        let config = self.config();
        let hand_width = config.hand_width * geometry.ratio;

        painter.clear();
        draw_dial(painter, geometry, config.dial_color);

        if config.use_duration {
            let hour = &self.hands().hour;
            let duration = &self.hands().duration;
            let start = normalize(hour.angle) - FRAC_PI_2;
            let sweep = normalize(duration.angle - hour.angle);
            painter.sector(
                geometry.center,
                hand_radius(geometry, HandKind::Duration),
                start,
                sweep,
                translucent(config.duration_color, config.alpha),
            );
            self.draw_hand(painter, geometry, duration, config.duration_color, hand_width);
        }

        self.draw_hand(painter, geometry, &self.hands().hour, config.hand_color, hand_width);
        self.draw_hand(painter, geometry, &self.hands().minute, config.hand_color, hand_width);

        painter.circle(
            geometry.center,
            geometry.center_radius,
            Style::Fill(config.hand_color),
        );
    }

    fn draw_hand(
        &self,
        painter: &mut impl Painter,
        geometry: &Geometry,
        hand: &Hand,
        color: Color,
        width: f32,
    ) {
        let tip = hand_tip(geometry, hand);
        painter.line(geometry.center, tip, color, width);
        painter.circle(
            tip,
            geometry.handle_radius,
            Style::Fill(translucent(color, self.config().alpha)),
        );
        if self.grabs().holds(hand.kind) {
            painter.circle(tip, geometry.handle_radius, Style::Stroke { color, width });
        }
        painter.circle(tip, geometry.center_radius, Style::Fill(color));
    }
}

fn draw_dial(painter: &mut impl Painter, geometry: &Geometry, color: Color) {
    painter.circle(
        geometry.center,
        geometry.dial_radius,
        Style::Stroke { color, width: 1.0 },
    );
    for tick in compute_ticks(geometry.center, geometry.dial_radius, &TickConfig::default()) {
        painter.line(tick.inner, tick.outer, color, 1.0);
    }
}

fn hand_radius(geometry: &Geometry, kind: HandKind) -> f32 {
    geometry.dial_radius * kind.length_ratio()
}

fn hand_tip(geometry: &Geometry, hand: &Hand) -> Point {
    let screen_angle = hand.angle - FRAC_PI_2;
    let radius = hand_radius(geometry, hand.kind);
    Point::new(
        geometry.center.x + screen_angle.cos() * radius,
        geometry.center.y + screen_angle.sin() * radius,
    )
}

fn translucent(color: Color, alpha: f32) -> Color {
    Color { a: alpha, ..color }
}
