// tests/widget_race.rs
//
// Concurrent triggers: only the most recently issued request may write the card,
// no matter in which order the responses arrive. Nothing is cancelled or blocked.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use advice_card::{
    AdviceRecord, AdviceSource, AdviceWidget, CardState, FetchError, FetchOutcome, Trigger,
};

type Reply = Result<AdviceRecord, FetchError>;

/// Each call parks until the test releases it.
#[derive(Default)]
struct Gated {
    pending: Mutex<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl Gated {
    fn calls(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    fn release(&self, call: usize, reply: Reply) {
        let tx = self.pending.lock().unwrap()[call]
            .take()
            .expect("call already released");
        let _ = tx.send(reply);
    }
}

#[async_trait]
impl AdviceSource for Gated {
    async fn fetch_advice(&self) -> Result<AdviceRecord, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push(Some(tx));
        rx.await
            .unwrap_or_else(|_| Err(FetchError::transport("gate dropped")))
    }
    fn name(&self) -> &'static str {
        "gated"
    }
}

struct Harness {
    src: Arc<Gated>,
    widget: Arc<AdviceWidget<CardState>>,
}

impl Harness {
    fn new() -> Self {
        let src = Arc::new(Gated::default());
        let widget = Arc::new(AdviceWidget::new(src.clone(), CardState::new()));
        Self { src, widget }
    }

    /// Spawn a trigger and wait until its fetch is in flight.
    async fn start(&self, trigger: Trigger) -> tokio::task::JoinHandle<FetchOutcome> {
        let issued = self.src.calls();
        let w = self.widget.clone();
        let h = tokio::spawn(async move { w.request_advice(trigger).await });
        self.src.wait_for_calls(issued + 1).await;
        h
    }
}

#[tokio::test]
async fn newest_request_wins_when_it_finishes_first() {
    let h = Harness::new();
    let first = h.start(Trigger::PageReady).await;
    let second = h.start(Trigger::UserRequest).await;

    h.src.release(1, Ok(AdviceRecord::new(2, "Second.")));
    assert!(second.await.unwrap().is_rendered());

    h.src.release(0, Ok(AdviceRecord::new(1, "First.")));
    assert_eq!(
        first.await.unwrap(),
        FetchOutcome::Superseded { seq: 1, latest: 2 }
    );

    let card = h.widget.snapshot();
    assert_eq!(card.advice, "\"Second.\"");
    assert_eq!(card.number, "ADVICE #2");
}

#[tokio::test]
async fn stale_response_arriving_first_is_discarded() {
    let h = Harness::new();
    let first = h.start(Trigger::UserRequest).await;
    let second = h.start(Trigger::UserRequest).await;

    // the older request resolves while the newer one is still in flight
    h.src.release(0, Ok(AdviceRecord::new(1, "Old.")));
    assert_eq!(
        first.await.unwrap(),
        FetchOutcome::Superseded { seq: 1, latest: 2 }
    );
    assert_eq!(h.widget.snapshot().advice, "", "stale result never reaches the card");

    h.src.release(1, Ok(AdviceRecord::new(2, "New.")));
    assert!(second.await.unwrap().is_rendered());
    assert_eq!(h.widget.snapshot().advice, "\"New.\"");
}

#[tokio::test]
async fn hung_request_does_not_block_a_newer_one() {
    let h = Harness::new();
    let hung = h.start(Trigger::PageReady).await;
    let fresh = h.start(Trigger::UserRequest).await;

    h.src.release(1, Ok(AdviceRecord::new(42, "Keep going.")));
    assert!(fresh.await.unwrap().is_rendered());
    assert_eq!(h.widget.snapshot().number, "ADVICE #42");
    assert!(!hung.is_finished());

    // once it finally resolves it is still discarded
    h.src.release(0, Ok(AdviceRecord::new(41, "Too late.")));
    assert!(matches!(hung.await.unwrap(), FetchOutcome::Superseded { .. }));
    assert_eq!(h.widget.snapshot().number, "ADVICE #42");
}

#[tokio::test]
async fn newer_failure_still_discards_older_success() {
    let h = Harness::new();
    let older = h.start(Trigger::UserRequest).await;
    let newer = h.start(Trigger::UserRequest).await;

    h.src.release(1, Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY)));
    assert!(matches!(newer.await.unwrap(), FetchOutcome::Failed { seq: 2, .. }));

    h.src.release(0, Ok(AdviceRecord::new(5, "Lost.")));
    assert!(matches!(older.await.unwrap(), FetchOutcome::Superseded { .. }));
    assert_eq!(h.widget.snapshot().advice, "");
}

#[tokio::test]
async fn sequential_requests_each_render() {
    let h = Harness::new();
    let a = h.start(Trigger::PageReady).await;
    h.src.release(0, Ok(AdviceRecord::new(1, "One.")));
    assert!(a.await.unwrap().is_rendered());

    let b = h.start(Trigger::UserRequest).await;
    h.src.release(1, Ok(AdviceRecord::new(2, "Two.")));
    assert!(b.await.unwrap().is_rendered());
    assert_eq!(h.widget.snapshot().advice, "\"Two.\"");
}
