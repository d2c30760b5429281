// src/render.rs
//! Text renderer: writes an advice record onto a display and derives the font-size scale
//! from the advice length.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::slip::AdviceRecord;

/// Longest advice (in characters) that still renders at the default size.
pub const SCALE_THRESHOLD_CHARS: usize = 90;

/// Shrink per character beyond the threshold, in tenths of a percent (0.2%).
const STEP_TENTHS: usize = 2;

/// Lower bound for the scale, in tenths of a percent (10%).
pub const MIN_SCALE_TENTHS: u32 = 100;

const FULL_SCALE_TENTHS: usize = 1000;

/// Font size as a percentage of the inherited size.
///
/// Stored in tenths of a percent so `99.8%` is represented exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontScale {
    tenths: u32,
}

impl FontScale {
    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    fn from_excess_chars(excess: usize) -> Self {
        let shrink = excess.saturating_mul(STEP_TENTHS);
        let tenths = FULL_SCALE_TENTHS.saturating_sub(shrink) as u32;
        Self {
            tenths: tenths.max(MIN_SCALE_TENTHS),
        }
    }

    pub fn tenths(self) -> u32 {
        self.tenths
    }

    pub fn percent(self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// CSS value, e.g. `99.8%` or `98%`.
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.tenths / 10;
        let frac = self.tenths % 10;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            write!(f, "{whole}.{frac}%")
        }
    }
}

impl Serialize for FontScale {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Scale for a given advice text. `None` means "default size".
///
/// Measures the bare advice: the two quote characters added for display are not counted.
pub fn font_scale_for(text: &str) -> Option<FontScale> {
    let len = text.trim().chars().count();
    if len <= SCALE_THRESHOLD_CHARS {
        None
    } else {
        Some(FontScale::from_excess_chars(len - SCALE_THRESHOLD_CHARS))
    }
}

/// The three mutations the card needs. Implemented by the in-memory card state and
/// by whatever front end hosts the widget.
pub trait AdviceDisplay: Send {
    fn set_advice_text(&mut self, text: &str);
    fn set_number_text(&mut self, text: &str);
    /// `None` clears the style back to the inherited size.
    fn set_font_size(&mut self, scale: Option<FontScale>);
}

/// Write `record` onto `display`: text first, then the derived font size.
pub fn render<D: AdviceDisplay + ?Sized>(
    display: &mut D,
    record: &AdviceRecord,
) -> Option<FontScale> {
    display.set_advice_text(&record.quoted_text());
    display.set_number_text(&record.label());
    let scale = font_scale_for(&record.text);
    display.set_font_size(scale);
    scale
}
