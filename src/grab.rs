//! Assignment of pointers to the hands they grab.

use iced::Point;

use crate::hand::{HandKind, Hands};

/// Per-pointer grab table, indexed like the pointer buffer.
#[derive(Debug, Clone, Default)]
pub struct Grabs {
    slots: Vec<Option<HandKind>>,
}

impl Grabs {
    /// Bind each pointer to the nearest unclaimed hand within `hit_radius`.
    ///
    /// Pointers are visited in order, so an earlier pointer wins a hand that
    /// two contacts are touching. `grabbable` filters hands that cannot be
    /// dragged right now (the duration hand while tracking is off).
    pub fn assign(
        pointers: &[Point],
        hands: &Hands,
        hit_radius: f32,
        grabbable: impl Fn(HandKind) -> bool,
    ) -> Self {
        let mut slots: Vec<Option<HandKind>> = Vec::with_capacity(pointers.len());

        for pointer in pointers {
            let nearest = HandKind::ALL
                .into_iter()
                .filter(|kind| grabbable(*kind) && !slots.contains(&Some(*kind)))
                .map(|kind| (kind, hands.get(kind).position.distance(*pointer)))
                .filter(|(_, distance)| *distance < hit_radius)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(kind, _)| kind);
            slots.push(nearest);
        }

        Self { slots }
    }

    /// Number of pointers holding a hand.
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Hand held by the pointer at `index`, if any.
    pub fn get(&self, index: usize) -> Option<HandKind> {
        self.slots.get(index).copied().flatten()
    }

    pub fn holds(&self, kind: HandKind) -> bool {
        self.slots.contains(&Some(kind))
    }

    /// Grabbed hands paired with their pointer index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, HandKind)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|kind| (index, kind)))
    }

    pub fn release(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hands_at(hour: (f32, f32), minute: (f32, f32), duration: (f32, f32)) -> Hands {
        let mut hands = Hands::default();
        hands.hour.position = Point::new(hour.0, hour.1);
        hands.minute.position = Point::new(minute.0, minute.1);
        hands.duration.position = Point::new(duration.0, duration.1);
        hands
    }

    #[test]
    fn pointer_outside_every_hit_zone_is_unassigned() {
        let hands = hands_at((0.0, 0.0), (100.0, 0.0), (0.0, 100.0));
        let grabs = Grabs::assign(&[Point::new(50.0, 50.0)], &hands, 16.0, |_| true);
        assert_eq!(grabs.get(0), None);
        assert!(grabs.is_empty());
    }

    #[test]
    fn nearest_hand_wins() {
        let hands = hands_at((0.0, 0.0), (10.0, 0.0), (200.0, 200.0));
        let grabs = Grabs::assign(&[Point::new(8.0, 0.0)], &hands, 16.0, |_| true);
        assert_eq!(grabs.get(0), Some(HandKind::Minute));
    }

    #[test]
    fn a_hand_is_claimed_once() {
        let hands = hands_at((0.0, 0.0), (100.0, 100.0), (200.0, 200.0));
        let pointers = [Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        let grabs = Grabs::assign(&pointers, &hands, 16.0, |_| true);
        assert_eq!(grabs.get(0), Some(HandKind::Hour));
        assert_eq!(grabs.get(1), None);
        assert_eq!(grabs.count(), 1);
    }

    #[test]
    fn two_pointers_two_hands() {
        let hands = hands_at((0.0, 0.0), (100.0, 0.0), (200.0, 200.0));
        let pointers = [Point::new(101.0, 0.0), Point::new(1.0, 1.0)];
        let grabs = Grabs::assign(&pointers, &hands, 16.0, |_| true);
        assert_eq!(
            grabs.iter().collect::<Vec<_>>(),
            vec![(0, HandKind::Minute), (1, HandKind::Hour)]
        );
    }

    #[test]
    fn filtered_hand_falls_through_to_next() {
        let hands = hands_at((50.0, 0.0), (0.0, 0.0), (0.0, 0.0));
        let grabs = Grabs::assign(&[Point::new(0.0, 0.0)], &hands, 16.0, |kind| {
            kind != HandKind::Minute
        });
        assert_eq!(grabs.get(0), Some(HandKind::Duration));
    }
}
