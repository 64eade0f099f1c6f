//! # Linear Frequency Slider Widget
//!
//! A custom Iced canvas widget for the horizontal frequency slider. It draws
//! the track with a marker for every catalog tone and a thumb that lights up
//! when the value sits on a special frequency, and turns pointer drags into
//! raw frequency inputs for the slider controller.
//!
//! ## Features
//! - Click or drag anywhere on the track to set the frequency
//! - Drags keep tracking while the pointer leaves the widget bounds
//! - Special-frequency markers with an active highlight
//! - Mouse and touch input

use iced::widget::canvas::{self, Event, Fill, Geometry, Path, Stroke, Text, event};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme, mouse, touch};

use tone_core::slider::position_to_frequency;

/// Horizontal inset of the track inside the widget bounds.
const TRACK_PADDING: f32 = 14.0;

/// A marker on the track for one catalog tone.
#[derive(Debug, Clone)]
pub struct SliderMark {
    /// Unit position along the track.
    pub fraction: f32,
    /// Whether the slider currently sits exactly on this tone.
    pub active: bool,
}

/// Interaction state: whether a drag is in progress.
#[derive(Debug, Default)]
pub struct DragState {
    dragging: bool,
}

/// The linear frequency slider widget.
#[derive(Debug, Clone)]
pub struct LinearSlider {
    /// Thumb position along the track as a unit fraction.
    thumb_fraction: f32,
    /// Catalog tone markers.
    markers: Vec<SliderMark>,
    /// Whether the value sits within tolerance of a catalog tone.
    at_special: bool,
    /// Whether the snapping highlight window is open.
    snapping: bool,
}

impl LinearSlider {
    pub fn new(
        thumb_fraction: f32,
        markers: Vec<SliderMark>,
        at_special: bool,
        snapping: bool,
    ) -> Self {
        Self {
            thumb_fraction,
            markers,
            at_special,
            snapping,
        }
    }

    // This consumes `self`, matching the other canvas widgets.
    pub fn view(self) -> Element<'static, super::super::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(60.0)),
        )
        .into()
    }

    fn track_width(width: f32) -> f32 {
        (width - 2.0 * TRACK_PADDING).max(1.0)
    }

    fn frequency_at(&self, x: f32, width: f32) -> f64 {
        let fraction = ((x - TRACK_PADDING) / Self::track_width(width)).clamp(0.0, 1.0);
        position_to_frequency(fraction as f64)
    }
}

impl<Message> canvas::Program<Message> for LinearSlider
where
    Message: From<super::super::Message>,
{
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.dragging = true;
                    let hz = self.frequency_at(position.x, bounds.width);
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::SliderInput(hz).into()),
                    );
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if state.dragging {
                    // Track the absolute cursor so the drag survives leaving
                    // the widget bounds, like a document-level listener.
                    if let Some(position) = cursor.position() {
                        let hz = self.frequency_at(position.x - bounds.x, bounds.width);
                        return (
                            event::Status::Captured,
                            Some(super::super::Message::SliderInput(hz).into()),
                        );
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.dragging {
                    state.dragging = false;
                    return (event::Status::Captured, None);
                }
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if bounds.contains(position) {
                    state.dragging = true;
                    let hz = self.frequency_at(position.x - bounds.x, bounds.width);
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::SliderInput(hz).into()),
                    );
                }
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                if state.dragging {
                    let hz = self.frequency_at(position.x - bounds.x, bounds.width);
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::SliderInput(hz).into()),
                    );
                }
            }
            Event::Touch(
                touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. },
            ) => {
                if state.dragging {
                    state.dragging = false;
                    return (event::Status::Captured, None);
                }
            }
            _ => {}
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let track_width = Self::track_width(bounds.width);
        let center_y = bounds.height / 2.0;

        // Track
        frame.fill_rectangle(
            Point::new(TRACK_PADDING, center_y - 2.0),
            Size::new(track_width, 4.0),
            Fill::from(Color::from_rgb8(0x40, 0x40, 0x40)),
        );

        // Filled portion up to the thumb
        frame.fill_rectangle(
            Point::new(TRACK_PADDING, center_y - 2.0),
            Size::new(track_width * self.thumb_fraction, 4.0),
            Fill::from(Color::from_rgb8(0x34, 0x98, 0xDB)),
        );

        // Special-frequency markers
        for mark in &self.markers {
            let x = TRACK_PADDING + track_width * mark.fraction;
            let (radius, color) = if mark.active {
                (5.0, Color::from_rgb8(0x34, 0xDB, 0x98))
            } else {
                (3.5, Color::from_rgba8(0x34, 0xDB, 0x98, 0.4))
            };
            frame.fill(&Path::circle(Point::new(x, center_y), radius), color);
        }

        // Thumb
        let thumb_x = TRACK_PADDING + track_width * self.thumb_fraction;
        let thumb_color = if self.snapping {
            Color::from_rgb8(0xFF, 0xC3, 0x00)
        } else if self.at_special {
            Color::from_rgb8(0x34, 0xDB, 0x98)
        } else {
            Color::WHITE
        };
        let thumb = Path::circle(Point::new(thumb_x, center_y), 8.0);
        frame.fill(&thumb, thumb_color);
        frame.stroke(
            &thumb,
            Stroke::default().with_width(1.0).with_color(Color::BLACK),
        );

        // Range labels under the track ends
        frame.fill_text(Text {
            content: "100 Hz".to_string(),
            position: Point::new(TRACK_PADDING, bounds.height - 4.0),
            color: Color::from_rgb8(0x90, 0x90, 0x90),
            size: 11.0.into(),
            horizontal_alignment: iced::alignment::Horizontal::Left,
            vertical_alignment: iced::alignment::Vertical::Bottom,
            ..Text::default()
        });
        frame.fill_text(Text {
            content: "1000 Hz".to_string(),
            position: Point::new(bounds.width - TRACK_PADDING, bounds.height - 4.0),
            color: Color::from_rgb8(0x90, 0x90, 0x90),
            size: 11.0.into(),
            horizontal_alignment: iced::alignment::Horizontal::Right,
            vertical_alignment: iced::alignment::Vertical::Bottom,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}
