//! Normalisation of raw mouse and touch input into canvas-local pointers.
//!
//! Hosts report positions relative to their own origin (the window client
//! area, or the page). The canvas sits at the sum of its ancestors' offsets,
//! shifted by the current scroll position, and its backing store may be denser
//! than the layout grid. Every pointer is mapped through that chain into
//! device pixels so hit testing can compare it against hand tips directly.

use iced::{Point, Vector};

/// Raw input as delivered by the host, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse position in client coordinates.
    Mouse(Point),
    /// A single synthetic pointer in page coordinates.
    Pointer(Point),
    /// Every touch currently on the surface, in client coordinates.
    Touch(Vec<Point>),
}

impl InputEvent {
    fn points(&self) -> &[Point] {
        match self {
            InputEvent::Mouse(point) | InputEvent::Pointer(point) => std::slice::from_ref(point),
            InputEvent::Touch(points) => points,
        }
    }

    /// Number of contacts this event still reports.
    pub fn contact_count(&self) -> usize {
        self.points().len()
    }
}

/// Whether the gesture that produced an event is still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Active,
    Ended,
}

/// Ratio between device pixels and backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRatio {
    pub device: f32,
    pub backing_store: f32,
}

impl PixelRatio {
    pub const IDENTITY: Self = Self {
        device: 1.0,
        backing_store: 1.0,
    };

    pub fn new(device: f32, backing_store: f32) -> Self {
        Self {
            device,
            backing_store,
        }
    }

    /// Scale factor from layout units to surface pixels. A missing or
    /// nonsensical backing-store ratio counts as 1.
    pub fn value(&self) -> f32 {
        let backing = if self.backing_store.is_finite() && self.backing_store > 0.0 {
            self.backing_store
        } else {
            1.0
        };
        self.device / backing
    }
}

impl Default for PixelRatio {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Where the canvas sits relative to the host's coordinate origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Offset of the canvas and of each positioned ancestor, innermost first.
    pub offset_chain: Vec<Vector>,
    /// Current page scroll offset.
    pub scroll: Vector,
}

impl Placement {
    /// Canvas origin in host coordinates.
    ///
    /// Walked on every call since ancestors may move between events.
    pub fn origin(&self) -> Point {
        let offset = self
            .offset_chain
            .iter()
            .fold(Vector::new(0.0, 0.0), |acc, step| acc + *step);
        Point::new(offset.x - self.scroll.x, offset.y - self.scroll.y)
    }
}

/// The live pointer buffer shared by hit testing and dragging.
#[derive(Debug, Clone, Default)]
pub struct Pointers {
    points: Vec<Point>,
}

impl Pointers {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace the buffer with the contacts of `event`, mapped into surface
    /// pixels.
    ///
    /// When the gesture has ended but a touch event still reports fingers on
    /// the surface (a partial multi-touch release), the remaining fingers
    /// become the new pointer set. Otherwise an ended gesture empties the
    /// buffer.
    pub fn update(&mut self, event: &InputEvent, gesture: Gesture, placement: &Placement, ratio: f32) {
        let remaining = match (gesture, event) {
            (Gesture::Active, _) => true,
            (Gesture::Ended, InputEvent::Touch(points)) => !self.is_empty() && !points.is_empty(),
            (Gesture::Ended, _) => false,
        };

        self.points.clear();
        if !remaining {
            return;
        }

        let origin = placement.origin();
        self.points.extend(event.points().iter().map(|point| {
            Point::new(
                ((point.x - origin.x) * ratio).trunc(),
                ((point.y - origin.y) * ratio).trunc(),
            )
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(chain: &[(f32, f32)], scroll: (f32, f32)) -> Placement {
        Placement {
            offset_chain: chain.iter().map(|&(x, y)| Vector::new(x, y)).collect(),
            scroll: Vector::new(scroll.0, scroll.1),
        }
    }

    #[test]
    fn origin_sums_chain_and_subtracts_scroll() {
        let placement = placement(&[(10.0, 20.0), (5.0, 5.0)], (3.0, 100.0));
        assert_eq!(placement.origin(), Point::new(12.0, -75.0));
    }

    #[test]
    fn mouse_point_is_offset_and_scaled() {
        let mut pointers = Pointers::default();
        pointers.update(
            &InputEvent::Mouse(Point::new(110.6, 45.0)),
            Gesture::Active,
            &placement(&[(10.0, 20.0)], (0.0, 0.0)),
            2.0,
        );
        assert_eq!(pointers.as_slice(), &[Point::new(201.0, 50.0)]);
    }

    #[test]
    fn synthetic_pointer_behaves_like_mouse() {
        let mut pointers = Pointers::default();
        pointers.update(
            &InputEvent::Pointer(Point::new(40.0, 40.0)),
            Gesture::Active,
            &Placement::default(),
            1.0,
        );
        assert_eq!(pointers.as_slice(), &[Point::new(40.0, 40.0)]);
    }

    #[test]
    fn every_touch_is_kept_in_order() {
        let mut pointers = Pointers::default();
        let event = InputEvent::Touch(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        pointers.update(&event, Gesture::Active, &Placement::default(), 1.0);
        assert_eq!(
            pointers.as_slice(),
            &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]
        );
    }

    #[test]
    fn partial_release_keeps_remaining_touches() {
        let mut pointers = Pointers::default();
        let both = InputEvent::Touch(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        pointers.update(&both, Gesture::Active, &Placement::default(), 1.0);

        let one_left = InputEvent::Touch(vec![Point::new(3.0, 4.0)]);
        pointers.update(&one_left, Gesture::Ended, &Placement::default(), 1.0);
        assert_eq!(pointers.as_slice(), &[Point::new(3.0, 4.0)]);

        pointers.update(&InputEvent::Touch(Vec::new()), Gesture::Ended, &Placement::default(), 1.0);
        assert!(pointers.is_empty());
    }

    #[test]
    fn ended_mouse_gesture_clears() {
        let mut pointers = Pointers::default();
        let event = InputEvent::Mouse(Point::new(5.0, 5.0));
        pointers.update(&event, Gesture::Active, &Placement::default(), 1.0);
        pointers.update(&event, Gesture::Ended, &Placement::default(), 1.0);
        assert!(pointers.is_empty());
    }

    #[test]
    fn broken_backing_ratio_counts_as_one() {
        assert_eq!(PixelRatio::new(2.0, 0.0).value(), 2.0);
        assert_eq!(PixelRatio::new(3.0, 1.5).value(), 2.0);
    }
}
