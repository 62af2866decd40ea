//! Store backends - where the dashboard's rows come from.
//!
//! [`RemoteStore`] is the seam between the query layer and the system of
//! record. Every list comes back already mapped to display records and
//! ordered the way the pages show them (by name, or newest first).

use crate::{
    config::store::{EndpointKind, StoreCredentials},
    core::{
        customer::{Customer, NewCustomer},
        finance::{FinancialTransaction, NewTransaction},
        product::{NewProduct, Product},
        sale::{NewSale, SalesOrder},
    },
    errors::{Error, Result},
};
use std::future::Future;
use tracing::{info, instrument, warn};

/// In-memory store serving seed data
pub mod memory;
/// REST endpoint of the hosted database, over HTTPS
pub mod rest;
/// Direct SQL connection through `SeaORM`
pub mod sql;

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use sql::SqlStore;

/// Row-level reads and inserts against the system of record.
pub trait RemoteStore: Send + Sync {
    /// All products ordered by name, with stock folded in.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// All customers ordered by name.
    fn list_customers(&self) -> impl Future<Output = Result<Vec<Customer>>> + Send;

    /// All sales orders, newest first.
    fn list_sales_orders(&self) -> impl Future<Output = Result<Vec<SalesOrder>>> + Send;

    /// All financial transactions, newest first.
    fn list_financial_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<FinancialTransaction>>> + Send;

    /// Inserts one product and returns the created row.
    fn insert_product(&self, payload: &NewProduct) -> impl Future<Output = Result<Product>> + Send;

    fn insert_customer(
        &self,
        payload: &NewCustomer,
    ) -> impl Future<Output = Result<Customer>> + Send;

    fn insert_sale(&self, payload: &NewSale) -> impl Future<Output = Result<SalesOrder>> + Send;

    fn insert_transaction(
        &self,
        payload: &NewTransaction,
    ) -> impl Future<Output = Result<FinancialTransaction>> + Send;
}

/// Maps stored rows to display records. A row whose status or kind is not
/// recognised is logged and left out of the list.
pub(crate) fn decode_each<R, T>(rows: Vec<R>, table: &str) -> Vec<T>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping a {} row: {}", table, e);
                None
            }
        })
        .collect()
}

/// The backend chosen at startup from the endpoint URL.
#[derive(Debug)]
pub enum Backend {
    /// `https://` endpoint
    Rest(RestStore),
    /// `postgres://` or `sqlite:` database URL
    Sql(SqlStore),
    /// Seed data only
    Memory(MemoryStore),
}

impl Backend {
    /// Opens the backend the credentials' URL points at.
    ///
    /// # Errors
    /// Returns `Error::Config` for an unsupported URL scheme, or the
    /// connection error of the SQL backend.
    #[instrument(skip(credentials), fields(schema = %credentials.schema))]
    pub async fn connect(credentials: &StoreCredentials) -> Result<Self> {
        let backend = match credentials.endpoint_kind()? {
            EndpointKind::Rest => Self::Rest(RestStore::new(
                &credentials.url,
                &credentials.api_key,
                &credentials.schema,
            )),
            EndpointKind::Sql => {
                Self::Sql(SqlStore::connect(&credentials.url, &credentials.schema).await?)
            }
        };
        info!("Using the {} store backend.", backend.name());
        Ok(backend)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rest(_) => "rest",
            Self::Sql(_) => "sql",
            Self::Memory(_) => "memory",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Backend::Rest($store) => $call.await,
            Backend::Sql($store) => $call.await,
            Backend::Memory($store) => $call.await,
        }
    };
}

impl RemoteStore for Backend {
    async fn list_products(&self) -> Result<Vec<Product>> {
        dispatch!(self, store => store.list_products())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        dispatch!(self, store => store.list_customers())
    }

    async fn list_sales_orders(&self) -> Result<Vec<SalesOrder>> {
        dispatch!(self, store => store.list_sales_orders())
    }

    async fn list_financial_transactions(&self) -> Result<Vec<FinancialTransaction>> {
        dispatch!(self, store => store.list_financial_transactions())
    }

    async fn insert_product(&self, payload: &NewProduct) -> Result<Product> {
        dispatch!(self, store => store.insert_product(payload))
    }

    async fn insert_customer(&self, payload: &NewCustomer) -> Result<Customer> {
        dispatch!(self, store => store.insert_customer(payload))
    }

    async fn insert_sale(&self, payload: &NewSale) -> Result<SalesOrder> {
        dispatch!(self, store => store.insert_sale(payload))
    }

    async fn insert_transaction(&self, payload: &NewTransaction) -> Result<FinancialTransaction> {
        dispatch!(self, store => store.insert_transaction(payload))
    }
}
