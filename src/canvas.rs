//! `iced` canvas front-end for [`TouchClock`].
//!
//! The application owns the clock. [`ClockDial`] borrows it for drawing and
//! turns iced mouse and touch events into [`ClockEvent`]s, which the
//! application feeds back through [`TouchClock::handle`].

use iced::widget::canvas::{self, Path, Stroke, path};
use iced::{Color, Element, Event, Length, Point, Radians, Rectangle, Renderer, Theme, Vector};
use iced::{mouse, touch};
use tracing::warn;

use crate::clock::{Response, TouchClock};
use crate::geometry::{Geometry, Viewport};
use crate::paint::{Painter, Style};
use crate::pointer::{InputEvent, PixelRatio, Placement};

// ================================================================================
// Events
// ================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Down,
    Move,
    Up,
}

/// A pointer event captured by the dial, ready for [`TouchClock::handle`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClockEvent {
    pub phase: Phase,
    pub input: InputEvent,
    /// Bounds of the dial in window coordinates when the event arrived.
    pub bounds: Rectangle,
}

fn viewport_of(bounds: Rectangle) -> Viewport {
    // canvas frames are laid out in logical pixels
    Viewport::new(bounds.size(), PixelRatio::IDENTITY)
}

fn placement_of(bounds: Rectangle) -> Placement {
    Placement {
        offset_chain: vec![Vector::new(bounds.x, bounds.y)],
        scroll: Vector::new(0.0, 0.0),
    }
}

impl TouchClock {
    /// Apply an event published by [`ClockDial`].
    ///
    /// Follows the dial's bounds first, so hit testing always matches what
    /// was painted.
    pub fn handle(&mut self, event: ClockEvent) -> Response {
        let viewport = viewport_of(event.bounds);
        if viewport != *self.viewport() {
            if let Err(error) = self.resize(viewport) {
                warn!(%error, "dropping clock event");
                return Response::IGNORED;
            }
        }
        self.set_offset_chain(placement_of(event.bounds).offset_chain);

        match event.phase {
            Phase::Down => self.pointer_down(&event.input),
            Phase::Move => self.pointer_move(&event.input),
            Phase::Up => self.pointer_up(&event.input),
        }
    }
}

// ================================================================================
// Widget state
// ================================================================================

/// Per-widget input bookkeeping, kept in iced's widget tree.
#[derive(Debug, Default)]
pub struct DialState {
    /// Fingers on the dial in the order they touched down.
    fingers: Vec<(touch::Finger, Point)>,
    /// A captured gesture is in progress.
    dragging: bool,
}

impl DialState {
    fn touches(&self) -> InputEvent {
        InputEvent::Touch(self.fingers.iter().map(|(_, position)| *position).collect())
    }

    fn press(&mut self, id: touch::Finger, position: Point) {
        match self.fingers.iter_mut().find(|(finger, _)| *finger == id) {
            Some(entry) => entry.1 = position,
            None => self.fingers.push((id, position)),
        }
    }

    /// Returns false for fingers that never touched down on the dial.
    fn track(&mut self, id: touch::Finger, position: Point) -> bool {
        match self.fingers.iter_mut().find(|(finger, _)| *finger == id) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    fn lift(&mut self, id: touch::Finger) -> bool {
        let before = self.fingers.len();
        self.fingers.retain(|(finger, _)| *finger != id);
        self.fingers.len() != before
    }
}

// ================================================================================
// ClockDial
// ================================================================================

pub struct ClockDial<'a, Message> {
    clock: &'a TouchClock,
    on_event: Option<Box<dyn Fn(ClockEvent) -> Message + 'a>>,
}

impl<'a, Message> ClockDial<'a, Message> {
    pub fn new(clock: &'a TouchClock) -> Self {
        Self {
            clock,
            on_event: None,
        }
    }

    /// Message to publish for every pointer event that acts on the clock.
    pub fn on_event(mut self, on_event: impl Fn(ClockEvent) -> Message + 'a) -> Self {
        self.on_event = Some(Box::new(on_event));
        self
    }

    pub fn view(self) -> Element<'a, Message>
    where
        Message: 'a,
    {
        canvas::Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn publish(&self, event: ClockEvent) -> canvas::Action<Message> {
        match &self.on_event {
            Some(on_event) => canvas::Action::publish(on_event(event)).and_capture(),
            None => canvas::Action::request_redraw().and_capture(),
        }
    }

    fn would_grab(&self, input: &InputEvent, bounds: Rectangle) -> bool {
        self.clock
            .would_grab(input, &viewport_of(bounds), &placement_of(bounds))
    }
}

impl<Message> canvas::Program<Message> for ClockDial<'_, Message> {
    type State = DialState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let (phase, input) = match event {
            // ---- Mouse ----
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_over(bounds)?;
                (Phase::Down, InputEvent::Mouse(position))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if !state.dragging || !state.fingers.is_empty() {
                    return None;
                }
                // leaving the dial ends the drag
                if bounds.contains(*position) {
                    (Phase::Move, InputEvent::Mouse(*position))
                } else {
                    (Phase::Up, InputEvent::Mouse(*position))
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Mouse(mouse::Event::CursorLeft) => {
                if !state.dragging || !state.fingers.is_empty() {
                    return None;
                }
                (Phase::Up, InputEvent::Mouse(cursor.position().unwrap_or(Point::ORIGIN)))
            }

            // ---- Touch ----
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                state.press(*id, *position);
                (Phase::Down, state.touches())
            }
            Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if !state.track(*id, *position) || !state.dragging {
                    return None;
                }
                (Phase::Move, state.touches())
            }
            Event::Touch(touch::Event::FingerLifted { id, .. })
            | Event::Touch(touch::Event::FingerLost { id, .. }) => {
                if !state.lift(*id) || !state.dragging {
                    return None;
                }
                (Phase::Up, state.touches())
            }

            _ => return None,
        };

        match phase {
            Phase::Down => {
                if !self.would_grab(&input, bounds) {
                    // nothing under the pointer, let the event through
                    return None;
                }
                state.dragging = true;
            }
            Phase::Move => {}
            Phase::Up => state.dragging = false,
        }

        Some(self.publish(ClockEvent {
            phase,
            input,
            bounds,
        }))
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let geometry = Geometry::new(&viewport_of(bounds));

        self.clock.draw_with(&mut frame, &geometry);

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.dragging {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_over(bounds) {
            Some(position) if self.would_grab(&InputEvent::Mouse(position), bounds) => {
                mouse::Interaction::Grab
            }
            _ => mouse::Interaction::default(),
        }
    }
}

// ================================================================================
// Painter for canvas frames
// ================================================================================

impl Painter for canvas::Frame {
    fn clear(&mut self) {
        // frames start empty on every draw
    }

    fn circle(&mut self, center: Point, radius: f32, style: Style) {
        let circle = Path::circle(center, radius);
        match style {
            Style::Fill(color) => self.fill(&circle, color),
            Style::Stroke { color, width } => self.stroke(
                &circle,
                Stroke::default().with_color(color).with_width(width),
            ),
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.stroke(
            &Path::line(from, to),
            Stroke::default().with_color(color).with_width(width),
        );
    }

    fn sector(&mut self, center: Point, radius: f32, start: f32, sweep: f32, color: Color) {
        if sweep <= 0.0 {
            return;
        }
        let slice = Path::new(|builder| {
            builder.move_to(center);
            builder.arc(path::Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + sweep),
            });
            builder.close();
        });
        self.fill(&slice, color);
    }
}
