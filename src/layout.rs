//! Screen composition for the 480x320 panel.
//!
//! [`compose`] maps the derived state onto a fixed set of text labels
//! plus two divider rules.  The result is plain data; a `DisplayPort`
//! implementation decides how to rasterise it.

use crate::palette::{DIVIDER, GRAY, Rgb, Tone};
use crate::state::DashboardState;
use crate::units::{self, UNKNOWN};

pub const SCREEN_WIDTH: i32 = 480;
pub const SCREEN_HEIGHT: i32 = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// 72 px bold
    Big,
    /// 32 px
    Medium,
    /// 24 px
    Small,
}

/// What each label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
    Conditions,
    Date,
    Time,
    AirQuality,
    Uv,
    Flex,
    Inside,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub field: Field,
    pub text: String,
    pub color: Rgb,
    pub font: FontSize,
    /// Fraction of the label's own box pinned to `position`.
    pub anchor: (f32, f32),
    pub position: (i32, i32),
}

/// Horizontal one-pixel rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub color: Rgb,
}

pub const RULES: [Rule; 2] = [
    Rule { x: 10, y: 78, width: 460, color: DIVIDER },
    Rule { x: 10, y: 248, width: 460, color: DIVIDER },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub labels: Vec<Label>,
    pub rules: [Rule; 2],
}

impl Frame {
    pub fn label(&self, field: Field) -> Option<&Label> {
        self.labels.iter().find(|l| l.field == field)
    }

    pub fn text(&self, field: Field) -> &str {
        self.label(field).map_or("", |l| l.text.as_str())
    }
}

const BOTTOM_LEFT: (f32, f32) = (0.0, 1.0);
const BOTTOM_RIGHT: (f32, f32) = (1.0, 1.0);

fn placeholder<T: ToString>(v: Option<T>) -> String {
    v.map_or_else(|| String::from(UNKNOWN), |v| v.to_string())
}

/// Build the frame for the current state.
pub fn compose(state: &DashboardState) -> Frame {
    let d = &state.display;
    let w = &state.weather;
    let i = &state.inside;

    let label = |field, text: String, color: Rgb, font, anchor, position| Label {
        field,
        text,
        color,
        font,
        anchor,
        position,
    };

    let labels = vec![
        label(
            Field::Temperature,
            placeholder(w.temperature_f),
            d.tones.temperature.rgb(),
            FontSize::Big,
            BOTTOM_LEFT,
            (10, 60),
        ),
        label(
            Field::Humidity,
            format!("{}%", placeholder(w.humidity_pct)),
            d.tones.humidity.rgb(),
            FontSize::Medium,
            BOTTOM_LEFT,
            (128, 62),
        ),
        label(
            Field::Conditions,
            w.conditions.clone().unwrap_or_else(|| String::from(UNKNOWN)),
            Tone::Default.rgb(),
            FontSize::Medium,
            BOTTOM_LEFT,
            (204, 62),
        ),
        label(
            Field::Date,
            format!("{}, {} {}", d.day_of_week, d.month, d.day_of_month),
            GRAY,
            FontSize::Medium,
            BOTTOM_LEFT,
            (10, 310),
        ),
        label(
            Field::Time,
            format!("{}:{}", d.hour, d.minute),
            GRAY,
            FontSize::Big,
            BOTTOM_RIGHT,
            (470, 305),
        ),
        label(
            Field::AirQuality,
            format!("Air Quality:  {}", units::aqi_label(state.air_quality.index)),
            d.tones.air_quality.rgb(),
            FontSize::Small,
            BOTTOM_LEFT,
            (30, 192),
        ),
        label(
            Field::Uv,
            format!("UV Danger:  {}", units::uv_label(w.uv_index)),
            d.tones.uv.rgb(),
            FontSize::Small,
            BOTTOM_LEFT,
            (30, 152),
        ),
        label(
            Field::Flex,
            d.flex.text.clone(),
            d.flex.tone.rgb(),
            FontSize::Small,
            BOTTOM_LEFT,
            (30, 112),
        ),
        label(
            Field::Inside,
            format!("Inside:   {}   {}%   {}ppm", i.temp_f, i.humidity_pct, i.co2_ppm),
            Tone::Default.rgb(),
            FontSize::Small,
            BOTTOM_LEFT,
            (30, 232),
        ),
    ];

    Frame { labels, rules: RULES }
}
