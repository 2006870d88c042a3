use chrono::{Local, Timelike};
use iced::widget::{Container, button, column, row, text};
use iced::{Element, Length, Size, Theme};
use iced_touch_clock::{
    ClockConfig, ClockDial, ClockEvent, DurationSpec, PixelRatio, TouchClock, Viewport,
};
use tracing_subscriber::EnvFilter;

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    iced::application(TouchClockDemo::new, TouchClockDemo::update, TouchClockDemo::view)
        .theme(Theme::Light)
        .run()
        .unwrap()
}

#[derive(Debug, Clone)]
enum Message {
    Clock(ClockEvent),
    UseDuration(bool),
}

struct TouchClockDemo {
    clock: TouchClock,
    use_duration: bool,
}

fn build_clock(use_duration: bool) -> TouchClock {
    let config = ClockConfig::builder().use_duration(use_duration).build();
    // resized to the real canvas bounds by the first event
    let viewport = Viewport::new(Size::new(400.0, 400.0), PixelRatio::IDENTITY);
    let mut clock = TouchClock::new(viewport, config)
        .expect("a fixed non-empty viewport is always drawable")
        .on_update(|clock| tracing::debug!(start = %clock.start_time(), stop = %clock.stop_time()));

    let now = Local::now();
    clock.set_hands(now.hour(), now.minute(), DurationSpec::Minutes(120));
    clock
}

impl TouchClockDemo {
    fn new() -> Self {
        Self {
            clock: build_clock(true),
            use_duration: true,
        }
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Clock(event) => {
                self.clock.handle(event);
            }
            Message::UseDuration(use_duration) => {
                let start = self.clock.start_time();
                let duration = self.clock.duration();
                self.clock = build_clock(use_duration);
                self.clock
                    .set_hands(start.hour, start.minute, DurationSpec::Minutes(duration));
                self.use_duration = use_duration;
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let mut info = column![
            text("Touch Clock"),
            text(""),
            text("Drag the hands with the mouse or with several fingers."),
            text(""),
            text(format!("Start: {}", self.clock.start_time_string())),
        ]
        .spacing(5);

        if self.use_duration {
            info = info
                .push(text(format!("Stop:  {}", self.clock.stop_time_string())))
                .push(text(format!("Duration: {} min", self.clock.duration())));
        }

        info = info
            .push(text(""))
            .push(
                button(text(if self.use_duration { "Hide duration" } else { "Track duration" }))
                    .on_press(Message::UseDuration(!self.use_duration)),
            );

        row![
            Container::new(ClockDial::new(&self.clock).on_event(Message::Clock).view())
                .width(Length::FillPortion(3))
                .height(Length::Fill),
            Container::new(info)
                .width(Length::FillPortion(1))
                .height(Length::Fill)
                .padding(20),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
