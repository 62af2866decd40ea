//! Inserts issued from the "new ..." forms.
//!
//! A mutation validates its payload, makes one insert attempt, and on success
//! invalidates the list it belongs to. Either outcome of the insert raises a
//! notification; a validation failure raises none because the form shows the
//! field errors itself.

use crate::{
    core::{
        customer::{Customer, NewCustomer},
        finance::{FinancialTransaction, NewTransaction},
        product::{NewProduct, Product},
        sale::{NewSale, SalesOrder},
    },
    errors::Result,
    notify::Notification,
    query::{QueryClient, QueryKey},
    store::RemoteStore,
};
use std::future::Future;
use tracing::{info, instrument, warn};

impl<S: RemoteStore> QueryClient<S> {
    /// # Errors
    /// Returns `Error::Validation` before any store call, or the store error
    /// of the failed insert.
    #[instrument(skip(self, payload), fields(sku = %payload.sku))]
    pub async fn create_product(&self, payload: &NewProduct) -> Result<Product> {
        payload.validate()?;
        self.mutate(QueryKey::Products, "Product", self.store.insert_product(payload))
            .await
    }

    /// # Errors
    /// Returns `Error::Validation` before any store call, or the store error
    /// of the failed insert.
    #[instrument(skip(self, payload))]
    pub async fn create_customer(&self, payload: &NewCustomer) -> Result<Customer> {
        payload.validate()?;
        self.mutate(QueryKey::Customers, "Customer", self.store.insert_customer(payload))
            .await
    }

    /// # Errors
    /// Returns `Error::Validation` before any store call, or the store error
    /// of the failed insert.
    #[instrument(skip(self, payload), fields(status = %payload.status))]
    pub async fn create_sale(&self, payload: &NewSale) -> Result<SalesOrder> {
        payload.validate()?;
        self.mutate(QueryKey::SalesOrders, "Sale", self.store.insert_sale(payload))
            .await
    }

    /// # Errors
    /// Returns `Error::Validation` before any store call, or the store error
    /// of the failed insert.
    #[instrument(skip(self, payload), fields(kind = %payload.kind))]
    pub async fn create_transaction(&self, payload: &NewTransaction) -> Result<FinancialTransaction> {
        payload.validate()?;
        self.mutate(
            QueryKey::FinancialTransactions,
            "Transaction",
            self.store.insert_transaction(payload),
        )
        .await
    }

    async fn mutate<T, Fut>(&self, key: QueryKey, label: &str, insert: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        match insert.await {
            Ok(row) => {
                self.cache.invalidate(key).await;
                info!("{} created, {} invalidated", label, key.as_str());
                self.notifier
                    .notify(Notification::success(format!("{label} created")));
                Ok(row)
            }
            Err(e) => {
                warn!("Insert into {} failed: {}", key.as_str(), e);
                self.notifier.notify(Notification::error(
                    format!("Could not create {}", label.to_lowercase()),
                    e.to_string(),
                ));
                Err(e)
            }
        }
    }
}
