use studymate_live::page::{MemoryPage, PageEvent, ReadyState};
use studymate_live::studymate_client::StudyMateClient;
use studymate_live::{Config, DashboardError, LiveDashboard};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "Live dashboard exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DashboardError> {
    let config = Config::load().await;
    let client = StudyMateClient::new(&config)?;
    let page = MemoryPage::dashboard(ReadyState::Loading);
    let dashboard = LiveDashboard::new(client, page.clone(), config);

    dashboard.init()?;
    page.set_ready_state(ReadyState::Complete);
    dashboard.handle_event(&PageEvent::ContentLoaded).await?;

    tokio::signal::ctrl_c().await?;
    info!("Interrupt received, unloading page");
    dashboard.handle_event(&PageEvent::BeforeUnload).await?;
    Ok(())
}
