use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sociopedika::{
    Config, Portal,
    services::{auth as auth_service, catalog::TheoryCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let (portal, _signals) = Portal::new(&config)?;

    if let (Ok(username), Ok(password)) = (env::var("PORTAL_USERNAME"), env::var("PORTAL_PASSWORD")) {
        match auth_service::login(&portal, &username, &password).await {
            Ok(outcome) => {
                tracing::info!("✅ Logged in, landing on {}", outcome.landing.path());
            }
            Err(e) => {
                tracing::error!("❌ Login failed: {}", e.user_message());
            }
        }
    }

    let keyword = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let mut catalog = TheoryCatalog::new();
    catalog.load(&portal, &keyword).await;

    if let Some(message) = catalog.theories.error() {
        anyhow::bail!("Unable to load theories: {}", message);
    }

    if catalog.theories.is_empty() {
        println!("No theories found.");
    }
    for theory in catalog.theories.items() {
        println!("[{}] {} ({})", theory.id, theory.title, theory.author);
        println!("    {}", theory.blurb());
    }

    auth_service::logout(&portal);
    Ok(())
}
