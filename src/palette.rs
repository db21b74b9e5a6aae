//! Display and indicator colours.
//!
//! Presentation functions return a [`Tone`] tag; only the layout stage
//! turns a tone into an [`Rgb`] value.

/// Colour as (R, G, B), each 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GRAY: Rgb = Rgb(128, 128, 128);
pub const DIVIDER: Rgb = Rgb(0x00, 0x40, 0xA0);

pub const FREEZING: Rgb = Rgb(192, 160, 224);
pub const COLD: Rgb = Rgb(100, 100, 200);
pub const MILD: Rgb = Rgb(100, 200, 100);
pub const WARM: Rgb = Rgb(200, 200, 100);
pub const HOT: Rgb = Rgb(240, 100, 100);
pub const SCORCH: Rgb = Rgb(250, 150, 30);

pub const GOOD: Rgb = Rgb(30, 252, 2);
pub const FAIR: Rgb = Rgb(222, 252, 20);
pub const MODERATE: Rgb = Rgb(252, 124, 8);
pub const BAD: Rgb = Rgb(220, 40, 40);
pub const VERY_BAD: Rgb = Rgb(252, 40, 80);

pub const DEFAULT: Rgb = Rgb(0, 200, 40);

/// Palette category chosen by the threshold functions in [`crate::units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral colour used for unknown readings and the plain flex line.
    Default,
    Gray,

    // Severity scale
    Good,
    Fair,
    Moderate,
    Bad,
    VeryBad,

    // Temperature scale
    Freezing,
    Cold,
    Mild,
    Warm,
    Hot,
    Scorch,
}

impl Tone {
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Default => DEFAULT,
            Self::Gray => GRAY,
            Self::Good => GOOD,
            Self::Fair => FAIR,
            Self::Moderate => MODERATE,
            Self::Bad => BAD,
            Self::VeryBad => VERY_BAD,
            Self::Freezing => FREEZING,
            Self::Cold => COLD,
            Self::Mild => MILD,
            Self::Warm => WARM,
            Self::Hot => HOT,
            Self::Scorch => SCORCH,
        }
    }
}

/// Status indicator level, written once per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningLevel {
    /// Connected, no alert: LED off.
    AllGood,
    /// No network: alerts cannot be trusted.
    YellowAlert,
    /// An in-effect weather alert.
    RedAlert,
}

impl WarningLevel {
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::AllGood => Rgb(0, 0, 0),
            Self::YellowAlert => Rgb(128, 128, 0),
            Self::RedAlert => Rgb(128, 0, 0),
        }
    }
}
