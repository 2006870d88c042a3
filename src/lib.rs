//! An analog clock for picking a start time and a duration by dragging its
//! hands with a mouse or with several fingers at once.
//!
//! [`TouchClock`] is the headless engine: it owns the hands, infers AM/PM and
//! hour carries from how the hands travel, and projects the result as start
//! and stop times. [`ClockDial`] puts it on an `iced` canvas.

pub mod angle;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grab;
pub mod hand;
pub mod paint;
pub mod pointer;
pub mod ticks;
pub mod time;

pub use canvas::{ClockDial, ClockEvent, Phase};
pub use clock::{DragState, DurationSpec, Response, TouchClock};
pub use config::ClockConfig;
pub use error::ClockError;
pub use geometry::Viewport;
pub use hand::HandKind;
pub use paint::{Painter, Style};
pub use pointer::{InputEvent, PixelRatio};
pub use time::ClockTime;
