// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod card;
pub mod config;
pub mod metrics;
pub mod render;
pub mod slip;
pub mod source;
pub mod widget;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::card::{CardSnapshot, CardState};
pub use crate::config::WidgetConfig;
pub use crate::render::{font_scale_for, render, AdviceDisplay, FontScale};
pub use crate::slip::AdviceRecord;
pub use crate::source::{AdviceSlipClient, AdviceSource, DynAdviceSource, FetchError};
pub use crate::widget::{AdviceWidget, FetchOutcome, Trigger};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs; `RUST_LOG` overrides the default filter.
/// Uses `try_init` so a subscriber already installed by the host runtime wins.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("advice_card=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}
