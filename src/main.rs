use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novadesk=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = novadesk::config::ClientConfig::load();
    info!("Starting Nova Desk client, server: {}", config.server_url);

    novadesk::ui::run(config)
}
