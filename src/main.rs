//! Advice Card — Binary Entrypoint
//! Boots the Axum HTTP server: advice API, static card page, optional /metrics.

use std::sync::Arc;

use advice_card::{api, metrics::Metrics, AdviceSlipClient, AppState, WidgetConfig};
use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    advice_card::init_tracing();

    let cfg = WidgetConfig::load()?;
    let client = AdviceSlipClient::from_config(&cfg)?;
    info!(endpoint = client.endpoint(), ui_dir = %cfg.ui_dir.display(), "advice card starting");

    let state = AppState::new(Arc::new(client));
    let mut router = api::router(state, &cfg.ui_dir);

    if cfg.metrics_enabled {
        match Metrics::init() {
            Ok(m) => router = router.merge(m.router()),
            Err(e) => warn!(error = ?e, "metrics disabled"),
        }
    }

    Ok(router.into())
}
