//! Fetches one advice through the real client and prints the resulting card as JSON.

use std::sync::Arc;

use advice_card::{AdviceSlipClient, AdviceWidget, CardState, Trigger, WidgetConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    advice_card::init_tracing();

    let cfg = WidgetConfig::load()?;
    let client = AdviceSlipClient::from_config(&cfg)?;
    let widget = AdviceWidget::new(Arc::new(client), CardState::new());

    let outcome = widget.request_advice(Trigger::PageReady).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    println!("{}", serde_json::to_string_pretty(&widget.snapshot())?);
    Ok(())
}
