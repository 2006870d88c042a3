use std::fmt;

use iced::Vector;
use tracing::{debug, trace, warn};

use crate::angle::{self, Crossing};
use crate::config::ClockConfig;
use crate::error::ClockError;
use crate::geometry::{Geometry, Viewport};
use crate::grab::Grabs;
use crate::hand::{HandKind, Hands};
use crate::pointer::{Gesture, InputEvent, Placement, Pointers};
use crate::time::ClockTime;

type UpdateCallback = Box<dyn FnMut(&TouchClock)>;

/// How the duration is given to [`TouchClock::set_hands`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSpec {
    /// Length in minutes.
    Minutes(u32),
    /// Absolute stop time; the duration becomes the forward distance from the
    /// start time on the 12-hour dial.
    Until(ClockTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { grabbed: usize },
}

/// Outcome of an input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The event acted on a hand; the host should suppress its default
    /// handling (page scrolling, text selection).
    pub consumed: bool,
    /// The dial needs to be repainted.
    pub redraw: bool,
}

impl Response {
    pub const IGNORED: Self = Self {
        consumed: false,
        redraw: false,
    };

    pub const CONSUMED: Self = Self {
        consumed: true,
        redraw: true,
    };
}

/// An analog clock whose hands pick a start time and a duration.
pub struct TouchClock {
    config: ClockConfig,
    viewport: Viewport,
    geometry: Geometry,
    placement: Placement,
    hands: Hands,
    hour: u32,
    minute: u32,
    duration: u32,
    is_am: bool,
    pointers: Pointers,
    grabs: Grabs,
    on_update: Option<UpdateCallback>,
}

impl TouchClock {
    /// Create a clock for `viewport`, or `None` when the surface cannot be
    /// drawn on.
    pub fn new(viewport: Viewport, config: ClockConfig) -> Option<Self> {
        match Self::try_new(viewport, config) {
            Ok(clock) => Some(clock),
            Err(error) => {
                warn!(%error, "cannot create touch clock");
                None
            }
        }
    }

    pub fn try_new(viewport: Viewport, config: ClockConfig) -> Result<Self, ClockError> {
        viewport.validate()?;

        let geometry = Geometry::new(&viewport);
        let start = config.start;
        let duration = config.duration;
        let mut clock = Self {
            config,
            viewport,
            geometry,
            placement: Placement::default(),
            hands: Hands::default(),
            hour: 0,
            minute: 0,
            duration,
            is_am: true,
            pointers: Pointers::default(),
            grabs: Grabs::default(),
            on_update: None,
        };
        clock.hands.set_dial_radius(geometry.dial_radius);
        clock.set_hands(start.hour, start.minute, DurationSpec::Minutes(duration));

        debug!(?viewport, "touch clock created");
        Ok(clock)
    }

    /// Register a callback run after every drag step that moved a hand.
    pub fn on_update(mut self, callback: impl FnMut(&TouchClock) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Duration in minutes.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_am(&self) -> bool {
        self.is_am
    }

    /// Active pointers in surface pixels.
    pub fn pointers(&self) -> &Pointers {
        &self.pointers
    }

    pub fn grabs(&self) -> &Grabs {
        &self.grabs
    }

    pub fn grabbed_count(&self) -> usize {
        self.grabs.count()
    }

    pub fn drag_state(&self) -> DragState {
        match self.grabs.count() {
            0 => DragState::Idle,
            grabbed => DragState::Dragging { grabbed },
        }
    }

    pub fn is_dragging(&self) -> bool {
        !self.grabs.is_empty()
    }

    pub fn start_time(&self) -> ClockTime {
        ClockTime {
            hour: self.hour,
            minute: self.minute,
        }
    }

    pub fn stop_time(&self) -> ClockTime {
        self.start_time().after(self.duration)
    }

    /// Start time as `HH:MM`.
    pub fn start_time_string(&self) -> String {
        self.start_time().to_string()
    }

    /// Stop time as `HH:MM`.
    pub fn stop_time_string(&self) -> String {
        self.stop_time().to_string()
    }

    /// Whether `input` would grab a hand if it landed on a dial laid out for
    /// `viewport` at `placement`. Nothing is mutated.
    pub fn would_grab(&self, input: &InputEvent, viewport: &Viewport, placement: &Placement) -> bool {
        if viewport.validate().is_err() {
            return false;
        }
        let geometry = Geometry::new(viewport);
        let mut hands = self.hands.clone();
        hands.set_dial_radius(geometry.dial_radius);
        hands.layout(geometry.center);

        let mut pointers = Pointers::default();
        pointers.update(input, Gesture::Active, placement, geometry.ratio);

        !Grabs::assign(pointers.as_slice(), &hands, geometry.handle_radius, |kind| {
            self.is_grabbable(kind)
        })
        .is_empty()
    }

    // ============================================================================
    // Programmatic updates
    // ============================================================================

    /// Show `hour:minute` and the given duration. Out-of-range values wrap.
    pub fn set_hands(&mut self, hour: u32, minute: u32, duration: DurationSpec) {
        let start = ClockTime::new(hour, minute);
        self.hour = start.hour;
        self.minute = start.minute;
        self.is_am = start.hour < 12;

        if self.config.use_duration {
            self.duration = match duration {
                DurationSpec::Minutes(minutes) => minutes,
                DurationSpec::Until(stop) => {
                    let stop = ClockTime::new(stop.hour, stop.minute);
                    angle::duration_from_angles(
                        angle::hour_angle(start.hour, start.minute),
                        angle::hour_angle(stop.hour, stop.minute),
                    )
                }
            };
        }

        self.snap_angles();
        self.layout();
    }

    /// Recompute the pixel geometry for a new surface size or pixel ratio.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ClockError> {
        viewport.validate()?;
        self.viewport = viewport;
        self.geometry = Geometry::new(&viewport);
        self.hands.set_dial_radius(self.geometry.dial_radius);
        self.layout();
        debug!(?viewport, "touch clock resized");
        Ok(())
    }

    /// Offsets of the surface and its positioned ancestors, innermost first.
    pub fn set_offset_chain(&mut self, chain: Vec<Vector>) {
        self.placement.offset_chain = chain;
    }

    /// Page scroll offset, subtracted from every pointer position.
    pub fn record_scroll(&mut self, scroll: Vector) {
        self.placement.scroll = scroll;
    }

    // ============================================================================
    // Drag controller
    // ============================================================================

    pub fn pointer_down(&mut self, input: &InputEvent) -> Response {
        self.grabs.release();
        self.pointers
            .update(input, Gesture::Active, &self.placement, self.geometry.ratio);

        let grabs = Grabs::assign(
            self.pointers.as_slice(),
            &self.hands,
            self.geometry.handle_radius,
            |kind| self.is_grabbable(kind),
        );
        self.grabs = grabs;

        if self.grabs.is_empty() {
            return Response::IGNORED;
        }

        debug!(grabs = ?self.grabs.iter().collect::<Vec<_>>(), "hands grabbed");
        Response::CONSUMED
    }

    pub fn pointer_move(&mut self, input: &InputEvent) -> Response {
        if self.grabs.is_empty() || input.contact_count() == 0 {
            return Response::IGNORED;
        }

        self.pointers
            .update(input, Gesture::Active, &self.placement, self.geometry.ratio);
        let moved = self.move_hands();

        if moved {
            if let Some(mut callback) = self.on_update.take() {
                callback(self);
                self.on_update = Some(callback);
            }
        }

        // contacts that vanished without an up event
        let reachable = self.pointers.len();
        if self.grabs.iter().all(|(index, _)| index >= reachable) {
            debug!("grabbed pointers gone, releasing");
            self.grabs.release();
            self.snap_angles();
        }

        self.layout();
        Response::CONSUMED
    }

    pub fn pointer_up(&mut self, input: &InputEvent) -> Response {
        if self.grabs.is_empty() {
            return Response::IGNORED;
        }

        self.grabs.release();
        self.snap_angles();
        self.pointers
            .update(input, Gesture::Ended, &self.placement, self.geometry.ratio);
        self.layout();

        debug!(
            start = %self.start_time(),
            duration = self.duration,
            remaining = self.pointers.len(),
            "hands released"
        );
        Response::CONSUMED
    }

    /// Returns whether any grabbed hand still had a pointer to follow.
    fn move_hands(&mut self) -> bool {
        let grabbed = self.grabs.count();
        let center = (self.geometry.center.x, self.geometry.center.y);
        let moves: Vec<_> = self
            .grabs
            .iter()
            .filter_map(|(index, kind)| self.pointers.as_slice().get(index).map(|p| (kind, *p)))
            .collect();
        let moved = !moves.is_empty();

        for (kind, pointer) in moves {
            let raw = angle::pointer_angle(center, pointer.x, pointer.y);
            self.hands.get_mut(kind).angle = raw;

            match kind {
                HandKind::Hour => self.move_hour_hand(raw, grabbed),
                HandKind::Minute => self.move_minute_hand(raw, grabbed),
                HandKind::Duration => {
                    self.duration =
                        angle::duration_from_angles(self.hands.hour.angle, self.hands.duration.angle);
                }
            }

            trace!(?kind, angle = raw, hour = self.hour, minute = self.minute, "hand moved");
        }
        moved
    }

    fn move_hour_hand(&mut self, raw: f32, grabbed: usize) {
        let current = angle::normalize(raw);
        if angle::crossing(self.hands.hour.last_angle, current) != Crossing::None {
            self.is_am = !self.is_am;
        }
        self.hour = angle::hour_from_angle(current, self.is_am);
        self.hands.hour.last_angle = current;

        if self.config.use_duration && grabbed == 1 {
            self.sync_duration_angle();
        }
    }

    fn move_minute_hand(&mut self, raw: f32, grabbed: usize) {
        let current = angle::normalize(raw);
        self.minute = angle::minute_from_angle(current);

        if grabbed == 1 {
            self.sync_hour_angle();
        }

        match angle::crossing(self.hands.minute.last_angle, current) {
            Crossing::Forward => self.add_hours(1),
            Crossing::Backward => self.add_hours(-1),
            Crossing::None => {}
        }
        self.hands.minute.last_angle = current;

        if self.config.use_duration && grabbed == 1 {
            self.sync_duration_angle();
        }
    }

    fn add_hours(&mut self, hours: i32) {
        self.hour = (self.hour as i32 + hours).rem_euclid(24) as u32;
        self.is_am = self.hour < 12;
        self.sync_hour_angle();
    }

    fn sync_hour_angle(&mut self) {
        self.hands
            .hour
            .set_angle(angle::hour_angle(self.hour, self.minute));
    }

    fn sync_duration_angle(&mut self) {
        let duration = angle::duration_angle(self.hands.hour.angle, self.duration);
        self.hands.duration.set_angle(duration);
    }

    /// Point every hand at the angle its clock value implies.
    fn snap_angles(&mut self) {
        self.sync_hour_angle();
        self.hands
            .minute
            .set_angle(angle::minute_angle(self.minute));
        if self.config.use_duration {
            self.sync_duration_angle();
        }
    }

    fn layout(&mut self) {
        self.hands.layout(self.geometry.center);
    }

    fn is_grabbable(&self, kind: HandKind) -> bool {
        self.config.use_duration || kind != HandKind::Duration
    }
}

impl fmt::Debug for TouchClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchClock")
            .field("start", &self.start_time())
            .field("duration", &self.duration)
            .field("is_am", &self.is_am)
            .field("geometry", &self.geometry)
            .field("grabs", &self.grabs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Size};

    use crate::pointer::PixelRatio;

    fn clock() -> TouchClock {
        let viewport = Viewport::new(Size::new(400.0, 400.0), PixelRatio::IDENTITY);
        TouchClock::try_new(viewport, ClockConfig::default()).unwrap()
    }

    #[test]
    fn empty_surface_fails_softly() {
        let viewport = Viewport::new(Size::new(0.0, 0.0), PixelRatio::IDENTITY);
        assert!(TouchClock::new(viewport, ClockConfig::default()).is_none());
    }

    #[test]
    fn starts_from_config() {
        let clock = clock();
        assert_eq!(clock.start_time_string(), "00:00");
        assert_eq!(clock.duration(), 120);
        assert_eq!(clock.drag_state(), DragState::Idle);
    }

    #[test]
    fn set_hands_wraps_out_of_range_values() {
        let mut clock = clock();
        clock.set_hands(26, 75, DurationSpec::Minutes(30));
        assert_eq!(clock.start_time(), ClockTime::new(2, 15));
        assert!(clock.is_am());
    }

    #[test]
    fn set_hands_until_computes_forward_duration() {
        let mut clock = clock();
        clock.set_hands(9, 15, DurationSpec::Until(ClockTime::new(11, 45)));
        assert_eq!(clock.duration(), 150);
        assert_eq!(clock.stop_time_string(), "11:45");

        clock.set_hands(22, 0, DurationSpec::Until(ClockTime::new(1, 30)));
        assert_eq!(clock.duration(), 210);
        assert_eq!(clock.stop_time_string(), "01:30");
    }

    #[test]
    fn stop_time_wraps_midnight() {
        let mut clock = clock();
        clock.set_hands(23, 50, DurationSpec::Minutes(20));
        assert_eq!(clock.stop_time(), ClockTime::new(0, 10));
        assert_eq!(clock.stop_time_string(), "00:10");
    }

    #[test]
    fn start_time_is_zero_padded() {
        let mut clock = clock();
        clock.set_hands(7, 5, DurationSpec::Minutes(0));
        assert_eq!(clock.start_time_string(), "07:05");
    }

    #[test]
    fn down_outside_hands_passes_through() {
        let mut clock = clock();
        let response = clock.pointer_down(&InputEvent::Mouse(Point::new(1.0, 1.0)));
        assert_eq!(response, Response::IGNORED);
        assert!(!clock.is_dragging());
    }

    #[test]
    fn resize_rejects_empty_viewport_and_keeps_geometry() {
        let mut clock = clock();
        let before = *clock.geometry();
        let result = clock.resize(Viewport::new(Size::new(0.0, 10.0), PixelRatio::IDENTITY));
        assert!(result.is_err());
        assert_eq!(*clock.geometry(), before);
    }

    #[test]
    fn would_grab_does_not_mutate() {
        let clock = clock();
        let tip = clock.hands().minute.position;
        let viewport = *clock.viewport();
        assert!(clock.would_grab(&InputEvent::Mouse(tip), &viewport, &Placement::default()));
        assert!(!clock.is_dragging());
    }
}
