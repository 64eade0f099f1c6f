//! # Spectrum View Widget
//!
//! Bar-chart rendering of the playing tone's magnitude spectrum. A pure
//! tone shows as a single spike that moves with the frequency controls;
//! the display is limited to the bins covering the controllable range.

use iced::widget::canvas::{self, Geometry, Path};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme, mouse};

/// Small epsilon value to prevent log(0) errors in magnitude calculations.
const EPSILON: f32 = 1e-12;

/// How many low-frequency bins to draw.
///
/// At 44.1 kHz with a 2048-point transform each bin is ~21.5 Hz, so 64 bins
/// comfortably cover the 100-1000 Hz control range.
const DISPLAY_BINS: usize = 64;

/// Spectrum widget for the playback visualization.
pub struct SpectrumView {
    /// Magnitude spectrum of the output tap.
    data: Vec<f32>,
}

impl SpectrumView {
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn view(self) -> Element<'static, super::super::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fill),
        )
        .into()
    }
}

impl<Message> canvas::Program<Message> for SpectrumView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let shown = &self.data[..self.data.len().min(DISPLAY_BINS)];
        if !bounds.width.is_finite() || !bounds.height.is_finite() || shown.is_empty() {
            return vec![frame.into_geometry()];
        }

        let max_magnitude = shown.iter().fold(0.0f32, |max, &val| val.max(max));
        if max_magnitude <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let log_max = (max_magnitude + EPSILON).ln();
        let bar_width = (bounds.width / shown.len() as f32).max(1.0);

        for (i, &magnitude) in shown.iter().enumerate() {
            let log_magnitude = (magnitude + EPSILON).ln();
            let height = (log_magnitude / log_max * bounds.height).max(0.0);

            if height.is_finite() && height > 0.0 {
                let bar = Path::rectangle(
                    Point::new(i as f32 * bar_width, bounds.height - height),
                    Size::new(bar_width, height),
                );
                frame.fill(&bar, Color::from_rgb8(0x34, 0x98, 0xDB));
            }
        }

        vec![frame.into_geometry()]
    }
}
