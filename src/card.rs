// src/card.rs
//! In-memory card: the display surface the HTTP front end reads from.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::render::{AdviceDisplay, FontScale};

#[derive(Debug, Clone, Default)]
pub struct CardState {
    advice_text: String,
    number_text: String,
    font_size: Option<FontScale>,
    updated_at: Option<DateTime<Utc>>,
}

/// What the page receives. `font_size: null` means default size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSnapshot {
    pub advice: String,
    pub number: String,
    pub font_size: Option<FontScale>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advice_text(&self) -> &str {
        &self.advice_text
    }

    pub fn number_text(&self) -> &str {
        &self.number_text
    }

    pub fn font_size(&self) -> Option<FontScale> {
        self.font_size
    }

    pub fn is_blank(&self) -> bool {
        self.advice_text.is_empty() && self.number_text.is_empty()
    }

    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            advice: self.advice_text.clone(),
            number: self.number_text.clone(),
            font_size: self.font_size,
            updated_at: self.updated_at,
        }
    }
}

impl AdviceDisplay for CardState {
    fn set_advice_text(&mut self, text: &str) {
        self.advice_text = text.to_string();
        self.updated_at = Some(Utc::now());
    }

    fn set_number_text(&mut self, text: &str) {
        self.number_text = text.to_string();
    }

    fn set_font_size(&mut self, scale: Option<FontScale>) {
        self.font_size = scale;
    }
}
