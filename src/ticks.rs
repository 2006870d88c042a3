use std::f32::consts::TAU;

use iced::Point;

#[derive(Clone, Debug)]
pub struct TickConfig {
    pub count: usize,
    /// Every n-th tick is drawn long.
    pub major_every: usize,
    /// Inner end of a long tick, as a fraction of the dial radius.
    pub major_inner: f32,
    /// Inner end of a short tick, as a fraction of the dial radius.
    pub minor_inner: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            count: 60,
            major_every: 5,
            major_inner: 0.85,
            minor_inner: 0.95,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub inner: Point,
    pub outer: Point,
    pub major: bool,
}

/// Tick marks running from the inner radius out to the dial edge.
pub fn compute_ticks(center: Point, radius: f32, config: &TickConfig) -> Vec<Tick> {
    if config.count == 0 {
        return Vec::new();
    }

    let step = TAU / config.count as f32;
    (0..config.count)
        .map(|n| {
            let (sin, cos) = (step * n as f32).sin_cos();
            let major = config.major_every > 0 && n % config.major_every == 0;
            let inner = radius * if major { config.major_inner } else { config.minor_inner };
            Tick {
                inner: Point::new(center.x + inner * cos, center.y + inner * sin),
                outer: Point::new(center.x + radius * cos, center.y + radius * sin),
                major,
            }
        })
        .collect()
}
