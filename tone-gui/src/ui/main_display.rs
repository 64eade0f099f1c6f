//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the Healing Tones application.

use iced::widget::{Space, button, column, container, horizontal_space, row, slider, text};
use iced::{Alignment, Element, Length};

use tone_core::matcher::SNAP_TOLERANCE_HZ;
use tone_core::slider::frequency_to_position;

use super::linear_slider::{LinearSlider, SliderMark};
use super::rotary_dial::{DialMark, RotaryDial};
use super::spectrum_view::SpectrumView;
use crate::{Message, PlayerApp};

/// Configuration for a single button in the settings sidebar
#[derive(Debug, Clone)]
struct ButtonConfig {
    label: &'static str,
    message: Option<Message>,
    button_type: ButtonType,
}

/// Different types of buttons with their styling requirements
#[derive(Debug, Clone)]
enum ButtonType {
    /// Standard button with no special styling
    Standard,
    /// Disabled button (no interaction)
    Disabled,
}

/// Static settings configuration - no need for a function
const SETTINGS_CONFIG: &[(&str, &[ButtonConfig])] = &[
    ("Tools", &[
        ButtonConfig { label: "Frequency slider", message: Some(Message::ToggleSliderPanel), button_type: ButtonType::Standard },
        ButtonConfig { label: "Frequency dial", message: Some(Message::ToggleDialPanel), button_type: ButtonType::Standard },
        ButtonConfig { label: "Spectrum", message: Some(Message::ToggleSpectrumPanel), button_type: ButtonType::Standard },
    ]),
    ("Pages", &[
        ButtonConfig { label: "Media Library", message: None, button_type: ButtonType::Disabled },
        ButtonConfig { label: "Map View", message: None, button_type: ButtonType::Disabled },
        ButtonConfig { label: "Sound Assistant", message: None, button_type: ButtonType::Disabled },
    ]),
    ("Program", &[
        ButtonConfig { label: "Save Catalog", message: Some(Message::SaveCatalog), button_type: ButtonType::Standard },
        ButtonConfig { label: "Load Catalog", message: Some(Message::LoadCatalog), button_type: ButtonType::Standard },
    ]),
];

/// Creates the complete main application view
pub fn create_main_view(app: &PlayerApp) -> Element<'static, Message> {
    let title = text("Healing Tones").size(28);

    // Build UI panels using dedicated helper methods
    let slider_panel = create_slider_panel(app);
    let dial_panel = create_dial_panel(app);
    let spectrum_panel = create_spectrum_panel(app);
    let info_panel = create_tone_info_panel(app);

    // Create sidebar
    let sidebar = create_sidebar();

    // Build widget row dynamically based on visibility
    let widget_row = match (slider_panel, dial_panel) {
        (Some(s), Some(d)) => row![s, Space::with_width(10), d],
        (Some(s), None) => row![s],
        (None, Some(d)) => row![d],
        (None, None) => row![],
    }
    .align_y(Alignment::Start);

    // Build bottom row dynamically based on visibility
    let bottom_row = match (spectrum_panel, info_panel) {
        (Some(s), Some(i)) => row![s, Space::with_width(10), i],
        (Some(s), None) => row![s],
        (None, Some(i)) => row![i],
        (None, None) => row![],
    }
    .align_y(Alignment::Start);

    // Assemble the final layout
    let main_content = row![
        column![
            title,
            Space::with_height(10),
            create_player_controls(app),
            Space::with_height(10),
            widget_row,
            Space::with_height(10),
            bottom_row,
        ]
        .width(Length::Fill)
        .spacing(10),
        Space::with_width(10),
        sidebar,
    ]
    .align_y(Alignment::Start)
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Creates the playback control row: readout, play/stop button, volume.
fn create_player_controls(app: &PlayerApp) -> Element<'static, Message> {
    let at_special = app.slider.is_at_special() || app.dial.is_at_special();

    // The readout mirrors every settled frequency push, so it matches what
    // the engine is (or will be) playing.
    let readout: Element<'static, Message> = if at_special {
        text(format!("{:.0} Hz", app.active_frequency))
            .size(32)
            .style(text::success)
            .into()
    } else {
        text(format!("{:.0} Hz", app.active_frequency)).size(32).into()
    };

    let play_label = if app.is_playing() {
        "Stop".to_string()
    } else {
        format!("Play {:.0} Hz", app.active_frequency)
    };
    let play_color = if app.is_playing() {
        iced::Color::from_rgb(0.8, 0.2, 0.2)
    } else {
        iced::Color::from_rgb8(0x34, 0xDB, 0x98)
    };
    let play_button = button(text(play_label).size(16))
        .padding([10, 24])
        .style(move |_theme, _status| {
            use iced::widget::button;
            button::Style {
                background: Some(iced::Background::Color(play_color)),
                text_color: iced::Color::BLACK,
                ..button::Style::default()
            }
        })
        .on_press(Message::TogglePlayback);

    let volume_row = row![
        text("Volume").size(14),
        Space::with_width(10),
        slider(0.0..=1.0, app.volume, Message::VolumeChanged)
            .step(0.01)
            .width(Length::Fixed(180.0)),
        Space::with_width(10),
        text(format!("{:.0}%", app.volume * 100.0)).size(14),
    ]
    .align_y(Alignment::Center);

    container(
        row![
            readout,
            horizontal_space(),
            play_button,
            horizontal_space(),
            volume_row,
        ]
        .align_y(Alignment::Center)
        .padding(15),
    )
    .width(Length::Fill)
    .into()
}

/// Creates the linear slider panel widget.
fn create_slider_panel(app: &PlayerApp) -> Option<Element<'static, Message>> {
    if !app.slider_visible {
        return None;
    }

    let frequency = app.slider.frequency();
    let markers = app
        .catalog()
        .entries()
        .iter()
        .map(|f| SliderMark {
            fraction: frequency_to_position(f.hz) as f32,
            active: f.hz == frequency,
        })
        .collect();

    let widget = LinearSlider::new(
        frequency_to_position(frequency) as f32,
        markers,
        app.slider.is_at_special(),
        app.slider.is_snapping(),
    );

    let heading = if app.slider.is_snapping() {
        text(format!("Frequency  {:.0} Hz (snapped)", frequency)).size(18)
    } else {
        text(format!("Frequency  {:.0} Hz", frequency)).size(18)
    };

    let panel = container(
        column![heading, Space::with_height(10), widget.view()]
            .spacing(5)
            .padding(15),
    )
    .width(Length::Fill)
    .height(Length::Fixed(150.0));

    Some(panel.into())
}

/// Creates the rotary dial panel widget.
fn create_dial_panel(app: &PlayerApp) -> Option<Element<'static, Message>> {
    if !app.dial_visible {
        return None;
    }

    let markers = app
        .catalog()
        .entries()
        .iter()
        .map(|f| DialMark {
            angle: tone_core::dial::frequency_to_angle(f.hz) as f32,
            active: (f.hz - app.dial.frequency()).abs() < SNAP_TOLERANCE_HZ,
        })
        .collect();

    let widget = RotaryDial::new(
        app.dial.rotation() as f32,
        markers,
        app.dial.is_at_special(),
    );

    let solfeggio = button(text("Solfeggio 528 Hz").size(13))
        .padding([4, 10])
        .on_press(Message::SolfeggioPreset);

    let panel = container(
        column![
            text(format!("Dial  {:.0} Hz", app.dial.frequency())).size(18),
            Space::with_height(10),
            widget.view(),
            Space::with_height(5),
            solfeggio,
        ]
        .spacing(5)
        .padding(15)
        .align_x(Alignment::Center),
    )
    .width(Length::Shrink)
    .height(Length::Fixed(370.0));

    Some(panel.into())
}

/// Creates the spectrum panel widget.
fn create_spectrum_panel(app: &PlayerApp) -> Option<Element<'static, Message>> {
    if !app.spectrum_visible {
        return None;
    }

    let spectrum_content = container(SpectrumView::new(app.spectrum.clone()).view())
        .width(Length::Fill)
        .height(Length::Fill);

    let panel = container(
        column![
            text("Spectrum").size(18),
            Space::with_height(10),
            spectrum_content
        ]
        .spacing(5)
        .padding(15),
    )
    .width(Length::Fill)
    .height(Length::Fixed(180.0));

    Some(panel.into())
}

/// Creates the info panel describing the matched special tone.
///
/// Shown whenever a visible widget sits within tolerance of a catalog
/// entry; hidden panels contribute nothing, so a dismissed widget can't
/// leave stale info behind.
fn create_tone_info_panel(app: &PlayerApp) -> Option<Element<'static, Message>> {
    let matched = app
        .slider
        .matched()
        .filter(|_| app.slider_visible)
        .or_else(|| app.dial.matched().filter(|_| app.dial_visible))?;

    let mut details = column![
        text(format!("{} ({:.0} Hz)", matched.name, matched.hz))
            .size(18)
            .style(text::success),
        Space::with_height(5),
        text(matched.description.clone()).size(14),
    ]
    .spacing(5);

    if !matched.benefits.is_empty() {
        details = details.push(Space::with_height(5));
        details = details.push(text("Reported Benefits").size(13));
        for benefit in matched.benefits.iter().take(3) {
            details = details.push(text(format!("- {}", benefit)).size(13));
        }
        if matched.benefits.len() > 3 {
            details = details.push(text(format!("+{} more", matched.benefits.len() - 3)).size(13));
        }
    }

    if !matched.references.is_empty() {
        details = details.push(Space::with_height(5));
        details = details.push(
            text(format!("{} research sources", matched.references.len())).size(13),
        );
    }

    let panel = container(details.padding(15))
        .width(Length::Fill)
        .height(Length::Shrink);

    Some(panel.into())
}

/// Creates the settings sidebar widget.
///
/// Builds the right-side settings panel containing all application controls
/// organized into logical sections (Tools, Pages, Program). Page buttons are
/// placeholders for the browsing views and stay disabled here.
fn create_sidebar() -> Element<'static, Message> {
    let mut sections = column![].spacing(10);

    // Add all settings sections
    for (title, buttons) in SETTINGS_CONFIG {
        sections = sections.push(make_settings_section(title, buttons));
    }

    container(sections.padding(15))
        .width(Length::Fixed(220.0))
        .height(Length::Fill)
        .into()
}

/// Creates a button based on configuration.
///
/// Disabled buttons are grayed out and non-interactive.
fn make_button(config: &ButtonConfig) -> Element<'static, Message> {
    let mut button = button(text(config.label).size(14).width(Length::Fill)).padding([6, 10]);

    match config.button_type {
        ButtonType::Standard => {
            // No special styling needed
        }
        ButtonType::Disabled => {
            button = button.style(|_theme, _status| {
                use iced::widget::button;
                button::Style {
                    background: Some(iced::Background::Color(iced::Color::from_rgb(0.3, 0.3, 0.3))), // Gray background
                    text_color: iced::Color::from_rgb(0.6, 0.6, 0.6), // Gray text
                    ..button::Style::default()
                }
            });
        }
    }

    // Add message handler if available
    if let Some(message) = &config.message {
        button.on_press(message.clone()).into()
    } else {
        button.into()
    }
}

/// Creates a settings section with title and buttons.
fn make_settings_section(
    title: &'static str,
    buttons: &[ButtonConfig],
) -> Element<'static, Message> {
    let title_widget = text(title).size(18);

    let items_widget = buttons
        .iter()
        .fold(column![].spacing(8), |col, config| {
            col.push(make_button(config))
        });

    column![title_widget, Space::with_height(10), items_widget]
        .spacing(5)
        .into()
}
