//! # Rotary Frequency Dial Widget
//!
//! A custom Iced canvas widget for the rotary dial. The face shows a marker
//! for every catalog tone along the 270-degree sweep and an indicator at the
//! controller's rotation; drags are converted to arc angles using the
//! geometry helpers from the core crate and snapping is applied by the
//! controller on every tracked move.
//!
//! ## Features
//! - Grab anywhere on the dial and turn; the drag keeps tracking while the
//!   pointer leaves the widget bounds
//! - Catalog tone markers around the sweep with an active highlight
//! - Mouse and touch input

use iced::widget::canvas::{self, Event, Fill, Geometry, Path, Stroke, Text, event};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Theme, mouse, touch};

use tone_core::dial::{DIAL_ARC_DEGREES, angle_from_pointer, clamp_to_arc};

/// A marker on the dial face for one catalog tone.
#[derive(Debug, Clone)]
pub struct DialMark {
    /// Angle on the sweep, degrees clockwise from the top.
    pub angle: f32,
    /// Whether the dial currently sits within tolerance of this tone.
    pub active: bool,
}

/// Interaction state: whether a drag is in progress.
#[derive(Debug, Default)]
pub struct DragState {
    dragging: bool,
}

/// The rotary frequency dial widget.
#[derive(Debug, Clone)]
pub struct RotaryDial {
    /// Indicator rotation, degrees clockwise from the top.
    rotation: f32,
    /// Catalog tone markers.
    markers: Vec<DialMark>,
    /// Whether the value sits within tolerance of a catalog tone.
    at_special: bool,
}

impl RotaryDial {
    pub fn new(rotation: f32, markers: Vec<DialMark>, at_special: bool) -> Self {
        Self {
            rotation,
            markers,
            at_special,
        }
    }

    // This consumes `self`, matching the other canvas widgets.
    pub fn view(self) -> Element<'static, super::super::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fixed(260.0))
                .height(iced::Length::Fixed(260.0)),
        )
        .into()
    }

    /// Arc angle for a pointer position given in widget coordinates.
    fn angle_at(position: Point, bounds: Rectangle) -> f64 {
        let center = (
            f64::from(bounds.width) / 2.0,
            f64::from(bounds.height) / 2.0,
        );
        let point = (f64::from(position.x), f64::from(position.y));
        clamp_to_arc(angle_from_pointer(center, point))
    }

    /// Unit direction for an arc angle, clockwise from the top.
    fn direction(angle_deg: f32) -> (f32, f32) {
        let rad = angle_deg.to_radians();
        (rad.sin(), -rad.cos())
    }
}

impl<Message> canvas::Program<Message> for RotaryDial
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
                    let angle = Self::angle_at(position, bounds);
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::DialPressed(angle).into()),
                    );
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if state.dragging {
                    // Absolute cursor position, so turning continues when the
                    // pointer leaves the dial - the drag only ends on release.
                    if let Some(position) = cursor.position() {
                        let relative = Point::new(position.x - bounds.x, position.y - bounds.y);
                        let angle = Self::angle_at(relative, bounds);
                        return (
                            event::Status::Captured,
                            Some(super::super::Message::DialTurned(angle).into()),
                        );
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.dragging {
                    state.dragging = false;
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::DialReleased.into()),
                    );
                }
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if bounds.contains(position) {
                    state.dragging = true;
                    let relative = Point::new(position.x - bounds.x, position.y - bounds.y);
                    let angle = Self::angle_at(relative, bounds);
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::DialPressed(angle).into()),
                    );
                }
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                if state.dragging {
                    let relative = Point::new(position.x - bounds.x, position.y - bounds.y);
                    let angle = Self::angle_at(relative, bounds);
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::DialTurned(angle).into()),
                    );
                }
            }
            Event::Touch(
                touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. },
            ) => {
                if state.dragging {
                    state.dragging = false;
                    return (
                        event::Status::Captured,
                        Some(super::super::Message::DialReleased.into()),
                    );
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

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = (bounds.width.min(bounds.height) / 2.0 - 22.0).max(10.0);

        // Dial face
        let face = Path::circle(center, radius);
        frame.fill(&face, Fill::from(Color::from_rgb8(0x2A, 0x2A, 0x2A)));
        frame.stroke(
            &face,
            Stroke::default()
                .with_width(2.0)
                .with_color(Color::from_rgb8(0x40, 0x40, 0x40)),
        );

        // Catalog tone markers around the sweep
        for mark in &self.markers {
            let dir = Self::direction(mark.angle);
            let (inner, width, color) = if mark.active {
                (radius - 18.0, 4.0, Color::from_rgb8(0x34, 0xDB, 0x98))
            } else {
                (radius - 12.0, 2.5, Color::from_rgba8(0x34, 0xDB, 0x98, 0.5))
            };
            let tick = Path::line(
                Point::new(center.x + dir.0 * inner, center.y + dir.1 * inner),
                Point::new(center.x + dir.0 * (radius - 3.0), center.y + dir.1 * (radius - 3.0)),
            );
            frame.stroke(&tick, Stroke::default().with_width(width).with_color(color));
        }

        // Knob
        let knob = Path::circle(center, radius * 0.62);
        frame.fill(&knob, Fill::from(Color::from_rgb8(0x4A, 0x4A, 0x4A)));

        // Indicator at the current rotation
        let dir = Self::direction(self.rotation);
        let indicator = Path::line(
            Point::new(center.x + dir.0 * radius * 0.25, center.y + dir.1 * radius * 0.25),
            Point::new(center.x + dir.0 * radius * 0.58, center.y + dir.1 * radius * 0.58),
        );
        let indicator_color = if self.at_special {
            Color::from_rgb8(0x34, 0xDB, 0x98)
        } else {
            Color::WHITE
        };
        frame.stroke(
            &indicator,
            Stroke::default().with_width(3.0).with_color(indicator_color),
        );
        frame.fill(&Path::circle(center, 4.0), indicator_color);

        // Range labels at the sweep ends
        let top = Self::direction(0.0);
        frame.fill_text(Text {
            content: "100 Hz".to_string(),
            position: Point::new(center.x + top.0 * (radius + 12.0), center.y + top.1 * (radius + 12.0)),
            color: Color::from_rgb8(0x90, 0x90, 0x90),
            size: 11.0.into(),
            horizontal_alignment: iced::alignment::Horizontal::Center,
            vertical_alignment: iced::alignment::Vertical::Center,
            ..Text::default()
        });
        let end = Self::direction(DIAL_ARC_DEGREES as f32);
        frame.fill_text(Text {
            content: "1000 Hz".to_string(),
            position: Point::new(center.x + end.0 * (radius + 14.0), center.y + end.1 * (radius + 14.0)),
            color: Color::from_rgb8(0x90, 0x90, 0x90),
            size: 11.0.into(),
            horizontal_alignment: iced::alignment::Horizontal::Center,
            vertical_alignment: iced::alignment::Vertical::Center,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}
