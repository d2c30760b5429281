// src/widget.rs
//! Fetch-and-render cycle with a latest-request-wins guard.
//!
//! Every trigger gets a monotonically increasing sequence number. Requests run
//! concurrently and are never cancelled, but only the most recently issued one may
//! touch the display; older completions are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::card::{CardSnapshot, CardState};
use crate::render::{render, AdviceDisplay, FontScale};
use crate::slip::AdviceRecord;
use crate::source::DynAdviceSource;

/// What asked for new advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    PageReady,
    #[default]
    UserRequest,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::PageReady => "page_ready",
            Trigger::UserRequest => "user_request",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    Rendered {
        seq: u64,
        record: AdviceRecord,
        font_size: Option<FontScale>,
    },
    /// Fetched fine, but a newer request was issued in the meantime.
    Superseded { seq: u64, latest: u64 },
    /// Display untouched; details went to the log.
    Failed { seq: u64, kind: &'static str },
}

impl FetchOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, FetchOutcome::Rendered { .. })
    }
}

pub struct AdviceWidget<D> {
    source: DynAdviceSource,
    display: Mutex<D>,
    issued: AtomicU64,
}

impl<D: AdviceDisplay> AdviceWidget<D> {
    pub fn new(source: DynAdviceSource, display: D) -> Self {
        Self {
            source,
            display: Mutex::new(display),
            issued: AtomicU64::new(0),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Sequence number of the most recently issued request (0 before the first one).
    pub fn latest_seq(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn with_display<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        let guard = self.display.lock().expect("display mutex poisoned");
        f(&*guard)
    }

    /// Run one fetch-and-render cycle. Never returns an error: failures are logged
    /// once and leave the display as it was.
    pub async fn request_advice(&self, trigger: Trigger) -> FetchOutcome {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        counter!("advice_fetch_total", "trigger" => trigger.as_str()).increment(1);

        let t0 = Instant::now();
        let fetched = self.source.fetch_advice().await;
        histogram!("advice_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        let record = match fetched {
            Ok(r) => r,
            Err(e) => {
                counter!("advice_fetch_failures_total", "kind" => e.kind()).increment(1);
                error!(
                    seq,
                    trigger = trigger.as_str(),
                    source = self.source.name(),
                    kind = e.kind(),
                    error = %e,
                    "There was a problem with the fetch operation"
                );
                return FetchOutcome::Failed {
                    seq,
                    kind: e.kind(),
                };
            }
        };

        // Check and write under the same lock so two completions cannot interleave.
        let font_size = {
            let mut display = self.display.lock().expect("display mutex poisoned");
            let latest = self.issued.load(Ordering::SeqCst);
            if seq != latest {
                counter!("advice_superseded_total").increment(1);
                debug!(seq, latest, id = record.id, "discarding superseded advice");
                return FetchOutcome::Superseded { seq, latest };
            }
            render(&mut *display, &record)
        };

        counter!("advice_rendered_total").increment(1);
        let shown = font_size.map_or_else(|| "default".to_string(), FontScale::to_css);
        info!(
            seq,
            trigger = trigger.as_str(),
            id = record.id,
            font_size = %shown,
            "advice rendered"
        );
        FetchOutcome::Rendered {
            seq,
            record,
            font_size,
        }
    }
}

impl AdviceWidget<CardState> {
    pub fn snapshot(&self) -> CardSnapshot {
        self.with_display(CardState::snapshot)
    }
}
