//! Dashboard root - owns the injected configuration, query client, theme and
//! notifier, and turns a page request into rendered text.

use crate::{
    config::AppConfig,
    core::{
        customer::CustomerFilter, export::write_inventory_csv, finance::FinanceFilter,
        product::InventoryFilter, sale::SaleFilter, settings::StoreProfile,
    },
    errors::Result,
    notify::Notifier,
    pages::{self, PageKind},
    query::QueryClient,
    store::RemoteStore,
    theme::{Theme, ThemeController},
    ui::{Page, Viewport},
};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Filter state of every list page.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub inventory: InventoryFilter,
    pub sales: SaleFilter,
    pub customers: CustomerFilter,
    pub finance: FinanceFilter,
}

pub struct Dashboard<S> {
    config: AppConfig,
    client: QueryClient<S>,
    theme: ThemeController,
    notifier: Arc<dyn Notifier>,
}

impl<S: RemoteStore> Dashboard<S> {
    pub fn new(
        config: AppConfig,
        client: QueryClient<S>,
        theme: ThemeController,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            client,
            theme,
            notifier,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn client(&self) -> &QueryClient<S> {
        &self.client
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme.theme()
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::with_breakpoint(self.config.viewport_width, self.config.mobile_breakpoint)
    }

    /// Builds `kind` from the current query states.
    #[instrument(skip(self, filters), fields(page = kind.as_str()))]
    pub async fn page(&self, kind: PageKind, filters: &Filters, today: NaiveDate) -> Page {
        match kind {
            PageKind::Dashboard => {
                let orders = self.client.sales_orders().await;
                let customers = self.client.customers().await;
                let products = self.client.products().await;
                pages::dashboard::build(&orders, &customers, &products, today)
            }
            PageKind::Inventory => {
                pages::inventory::build(&self.client.products().await, &filters.inventory)
            }
            PageKind::Sales => {
                let orders = self.client.sales_orders().await;
                let customers = self.client.customers().await;
                pages::sales::build(&orders, &customers, &filters.sales)
            }
            PageKind::Customers => {
                pages::customers::build(&self.client.customers().await, &filters.customers)
            }
            PageKind::Finance => pages::finance::build(
                &self.client.financial_transactions().await,
                &filters.finance,
                today,
            ),
            PageKind::Settings => pages::settings::build(&self.config.store, self.theme()),
        }
    }

    /// Renders `kind` with the default filters for the configured viewport.
    pub async fn render(&self, kind: PageKind, today: NaiveDate) -> String {
        let page = self.page(kind, &Filters::default(), today).await;
        format!("[theme: {}]\n{}", self.theme(), page.render(self.viewport()))
    }

    /// Writes the filtered inventory view to the export directory.
    ///
    /// # Errors
    /// Returns `Error::EmptyExport` when the view has no rows, or the error
    /// of writing the file.
    #[instrument(skip(self, filter))]
    pub async fn export_inventory(
        &self,
        filter: &InventoryFilter,
        today: NaiveDate,
    ) -> Result<PathBuf> {
        let state = self.client.products().await;
        if let Some(message) = state.error() {
            warn!("Exporting from the last good product list: {}", message);
        }
        let rows = pages::inventory::visible_products(&state, filter);
        let path = write_inventory_csv(&self.config.export_dir, &rows, today)?;
        info!("Inventory export written to {:?}", path);
        Ok(path)
    }

    /// # Errors
    /// Returns `Error::Validation` while any profile field is invalid.
    pub fn save_settings(&mut self, profile: StoreProfile) -> Result<()> {
        pages::settings::save(&profile, self.notifier.as_ref())?;
        self.config.store = profile;
        Ok(())
    }

    /// # Errors
    /// Returns the error of persisting the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme.toggle()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::notify::NotificationLog;
    use crate::query::DEFAULT_STALE_TIME;
    use crate::store::MemoryStore;
    use crate::theme::PreferenceStore;

    struct Harness {
        dashboard: Dashboard<MemoryStore>,
        store: Arc<MemoryStore>,
        log: Arc<NotificationLog>,
        dir: tempfile::TempDir,
    }

    fn harness(store: MemoryStore) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            preferences_path: dir.path().join("preferences.toml"),
            export_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let store = Arc::new(store);
        let log = Arc::new(NotificationLog::new());
        let notifier: Arc<dyn Notifier> = Arc::clone(&log) as Arc<dyn Notifier>;
        let client = QueryClient::new(Arc::clone(&store), DEFAULT_STALE_TIME, Arc::clone(&notifier));
        let theme = ThemeController::load(PreferenceStore::new(&config.preferences_path), Theme::Light);
        Harness {
            dashboard: Dashboard::new(config, client, theme, notifier),
            store,
            log,
            dir,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 4).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_reads_each_list_once() {
        let h = harness(MemoryStore::seeded());
        let text = h.dashboard.render(PageKind::Dashboard, today()).await;
        assert!(text.contains("== Dashboard =="));
        assert!(text.contains("R$ 5.780,00"));
        assert_eq!(h.store.read_count(), 3);

        h.dashboard.render(PageKind::Sales, today()).await;
        assert_eq!(h.store.read_count(), 3);
    }

    #[tokio::test]
    async fn test_narrow_viewport_stacks_tables() {
        let mut h = harness(MemoryStore::seeded());
        h.dashboard.config.viewport_width = 400;
        assert_eq!(h.dashboard.viewport(), Viewport::Mobile);
        let text = h.dashboard.render(PageKind::Inventory, today()).await;
        assert!(text.contains("SKU: RB-3025"));
    }

    #[tokio::test]
    async fn test_export_writes_filtered_view() {
        let h = harness(MemoryStore::seeded());
        let path = h
            .dashboard
            .export_inventory(&InventoryFilter::default(), today())
            .await
            .unwrap();
        assert_eq!(path, h.dir.path().join("inventory-2024-12-04.csv"));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_export_of_empty_store_is_refused() {
        let h = harness(MemoryStore::new());
        let result = h
            .dashboard
            .export_inventory(&InventoryFilter::default(), today())
            .await;
        assert!(matches!(result, Err(Error::EmptyExport)));
    }

    #[tokio::test]
    async fn test_theme_toggle_shows_in_render() {
        let mut h = harness(MemoryStore::seeded());
        assert_eq!(h.dashboard.toggle_theme().unwrap(), Theme::Dark);
        let text = h.dashboard.render(PageKind::Settings, today()).await;
        assert!(text.starts_with("[theme: dark]"));
    }

    #[tokio::test]
    async fn test_save_settings_notifies() {
        let mut h = harness(MemoryStore::seeded());
        let profile = StoreProfile {
            name: "Ótica Centro".to_string(),
            ..StoreProfile::default()
        };
        h.dashboard.save_settings(profile).unwrap();
        assert_eq!(h.dashboard.config().store.name, "Ótica Centro");
        assert_eq!(h.log.entries().len(), 1);
    }
}
