#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use retail_dashboard::{
    app::Dashboard,
    config::{StoreCredentials, load_default_config},
    core::product::InventoryFilter,
    errors::Result,
    notify::{LogNotifier, Notifier},
    pages::PageKind,
    query::QueryClient,
    store::Backend,
    theme::{PreferenceStore, ThemeController, system_theme},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Connect to the store named by the environment
    let credentials = StoreCredentials::from_env()
        .inspect_err(|e| error!("Store credentials are not configured: {}", e))?;
    let backend = Backend::connect(&credentials)
        .await
        .inspect(|b| info!("Connected to the {} store.", b.name()))
        .inspect_err(|e| error!("Failed to connect to the store: {}", e))?;

    // 5. Wire the dashboard
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let client = QueryClient::new(
        Arc::new(backend),
        app_config.stale_time(),
        Arc::clone(&notifier),
    );
    let theme = ThemeController::load(
        PreferenceStore::new(&app_config.preferences_path),
        system_theme(|name| env::var(name).ok()),
    );
    let dashboard = Dashboard::new(app_config, client, theme, notifier);

    // 6. Render the requested page, or export the inventory
    let today = chrono::Utc::now().date_naive();
    let arg = env::args().nth(1).unwrap_or_else(|| PageKind::default().to_string());
    if arg == "export" {
        let path = dashboard
            .export_inventory(&InventoryFilter::default(), today)
            .await
            .inspect_err(|e| error!("Inventory export failed: {}", e))?;
        println!("{}", path.display());
    } else {
        let kind: PageKind = arg.parse()?;
        println!("{}", dashboard.render(kind, today).await);
    }

    Ok(())
}
