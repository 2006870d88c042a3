use std::fmt;

/// A time of day on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Build a time, wrapping out-of-range values into 0..24 and 0..60.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    /// The time `minutes` later, wrapping past midnight.
    pub fn after(self, minutes: u32) -> Self {
        let total = self.minute as u64 + minutes as u64;
        let hour = (self.hour as u64 + total / 60) % 24;
        Self {
            hour: hour as u32,
            minute: (total % 60) as u32,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
