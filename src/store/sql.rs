//! Direct SQL backend built on `SeaORM`.
//!
//! Used when the endpoint URL is a database URL (`postgres://`, `sqlite:`),
//! and by the tests against in-memory `SQLite`. Reads join products with their
//! inventory rows; inserts write a single row and return it.

use crate::{
    config::database::create_tables,
    core::{
        customer::{Customer, NewCustomer},
        finance::{FinancialTransaction, NewTransaction},
        product::{NewProduct, Product},
        sale::{NewSale, SalesOrder},
    },
    entities::{
        Customer as CustomerEntity, FinancialTransaction as TransactionEntity, InventoryLevel,
        Product as ProductEntity, SalesOrder as SalesOrderEntity, customer,
        financial_transaction, product, sales_order,
    },
    errors::Result,
    store::{RemoteStore, decode_each},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Store backed by a `SeaORM` connection.
#[derive(Debug)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Wraps an existing connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connects to `url`. On Postgres every pooled connection searches
    /// `schema` first; a `SQLite` database gets its tables created.
    ///
    /// # Errors
    /// Returns `Error::Database` if the connection cannot be established.
    #[instrument(skip(url))]
    pub async fn connect(url: &str, schema: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(url.to_string());
        options.sqlx_logging(false);
        if url.starts_with("postgres") {
            options.set_schema_search_path(schema.to_string());
        }
        let db = Database::connect(options).await?;
        if url.starts_with("sqlite") {
            create_tables(&db).await?;
        }
        info!("Connected to SQL store (schema '{}').", schema);
        Ok(Self::new(db))
    }

    /// The underlying connection, for schema setup and tests.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RemoteStore for SqlStore {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = ProductEntity::find()
            .find_also_related(InventoryLevel)
            .order_by_asc(product::Column::Name)
            .all(&self.db)
            .await?;
        debug!("Fetched {} products.", rows.len());
        Ok(rows
            .into_iter()
            .map(|(row, level)| Product::from_storage(row, level.map(|l| l.quantity)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = CustomerEntity::find()
            .order_by_asc(customer::Column::Name)
            .all(&self.db)
            .await?;
        debug!("Fetched {} customers.", rows.len());
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_sales_orders(&self) -> Result<Vec<SalesOrder>> {
        let rows = SalesOrderEntity::find()
            .order_by_desc(sales_order::Column::CreatedAt)
            .all(&self.db)
            .await?;
        debug!("Fetched {} sales orders.", rows.len());
        Ok(decode_each(rows, "sales_orders"))
    }

    #[instrument(skip(self))]
    async fn list_financial_transactions(&self) -> Result<Vec<FinancialTransaction>> {
        let rows = TransactionEntity::find()
            .order_by_desc(financial_transaction::Column::CreatedAt)
            .all(&self.db)
            .await?;
        debug!("Fetched {} financial transactions.", rows.len());
        Ok(decode_each(rows, "financial_transactions"))
    }

    #[instrument(skip(self, payload), fields(sku = %payload.sku))]
    async fn insert_product(&self, payload: &NewProduct) -> Result<Product> {
        let row = product::ActiveModel {
            sku: Set(payload.sku.trim().to_string()),
            name: Set(payload.name.trim().to_string()),
            category: Set(payload.category.trim().to_string()),
            brand: Set(payload.brand.trim().to_string()),
            min_stock: Set(payload.min_stock),
            price: Set(payload.price),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        info!("Added product '{}' (ID: {}).", row.name, row.id);
        // A new product has no inventory row yet.
        Ok(Product::from_storage(row, None))
    }

    #[instrument(skip(self, payload))]
    async fn insert_customer(&self, payload: &NewCustomer) -> Result<Customer> {
        let row = customer::ActiveModel {
            name: Set(payload.name.trim().to_string()),
            email: Set(payload.email.trim().to_string()),
            phone: Set(payload.phone.clone().unwrap_or_default()),
            city: Set(payload.city.clone().unwrap_or_default()),
            total_purchases: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        info!("Added customer ID {}.", row.id);
        Ok(Customer::from(row))
    }

    #[instrument(skip(self, payload), fields(status = %payload.status))]
    async fn insert_sale(&self, payload: &NewSale) -> Result<SalesOrder> {
        let row = sales_order::ActiveModel {
            customer_id: Set(payload.customer_id),
            status: Set(payload.status.as_str().to_string()),
            payment_method: Set(Some(payload.payment_method.trim().to_string())),
            total: Set(payload.total),
            notes: Set(payload.notes().map(ToString::to_string)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        info!("Created sales order ID {} ({}).", row.id, row.status);
        SalesOrder::try_from(row)
    }

    #[instrument(skip(self, payload), fields(kind = %payload.kind))]
    async fn insert_transaction(&self, payload: &NewTransaction) -> Result<FinancialTransaction> {
        let row = financial_transaction::ActiveModel {
            kind: Set(payload.kind.as_str().to_string()),
            category: Set(payload.category.trim().to_string()),
            amount: Set(payload.amount),
            related_order_id: Set(payload.related_order_id),
            status: Set(payload.status().as_str().to_string()),
            description: Set(payload.description().map(ToString::to_string)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        info!("Recorded {} of {:.2} (ID {}).", row.kind, row.amount, row.id);
        FinancialTransaction::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        finance::{TransactionKind, TransactionStatus},
        sale::SaleStatus,
    };
    use crate::entities::{customer, inventory_level};
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_list_products_folds_inventory_levels() -> Result<()> {
        init_test_tracing();
        let store = setup_sql_store().await?;
        let with_stock = insert_product_row(&store, "RB-3025", "Óculos Ray-Ban Aviador", 5).await?;
        insert_inventory_level(&store, with_stock.id, 15).await?;
        insert_product_row(&store, "LT-G8-01", "Lente Transitions Gen 8", 10).await?;

        let products = store.list_products().await?;
        assert_eq!(products.len(), 2);
        // Ordered by name
        assert_eq!(products[0].sku, "LT-G8-01");
        assert_eq!(products[0].stock, 0);
        assert!(products[0].is_low_stock());
        assert_eq!(products[1].stock, 15);
        assert!(!products[1].is_low_stock());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_product_starts_without_stock() -> Result<()> {
        let store = setup_sql_store().await?;
        let created = store.insert_product(&new_product_fixture("OK-CL-01")).await?;
        assert_eq!(created.sku, "OK-CL-01");
        assert_eq!(created.stock, 0);
        assert!(created.is_active);

        let products = store.list_products().await?;
        assert_eq!(products, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn test_customers_ordered_by_name() -> Result<()> {
        let store = setup_sql_store().await?;
        store.insert_customer(&new_customer_fixture("Pedro Lima")).await?;
        store.insert_customer(&new_customer_fixture("Ana Costa")).await?;

        let customers = store.list_customers().await?;
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Costa", "Pedro Lima"]);
        assert_eq!(customers[0].total_purchases, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_sales_newest_first_with_canonical_status() -> Result<()> {
        let store = setup_sql_store().await?;
        let first = store.insert_sale(&new_sale_fixture(SaleStatus::Paid, 1250.0)).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.insert_sale(&new_sale_fixture(SaleStatus::Draft, 90.0)).await?;

        let raw = SalesOrderEntity::find_by_id(first.id).one(store.connection()).await?.unwrap();
        assert_eq!(raw.status, "pago");

        let orders = store.list_sales_orders().await?;
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
        assert_eq!(orders[1].status, SaleStatus::Paid);
        Ok(())
    }

    #[tokio::test]
    async fn test_drifted_status_spelling_is_decoded() -> Result<()> {
        let store = setup_sql_store().await?;
        sales_order::ActiveModel {
            customer_id: Set(None),
            status: Set("concluído".to_string()),
            payment_method: Set(None),
            total: Set(100.0),
            notes: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(store.connection())
        .await?;

        let orders = store.list_sales_orders().await?;
        assert_eq!(orders[0].status, SaleStatus::Paid);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_kind_skips_only_that_row() -> Result<()> {
        let store = setup_sql_store().await?;
        financial_transaction::ActiveModel {
            kind: Set("transfer".to_string()),
            category: Set("Misc".to_string()),
            amount: Set(1.0),
            related_order_id: Set(None),
            status: Set("pendente".to_string()),
            description: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(store.connection())
        .await?;

        store
            .insert_transaction(&new_transaction_fixture(TransactionKind::Inflow, 250.0))
            .await?;

        let transactions = store.list_financial_transactions().await?;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind, TransactionKind::Inflow);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_transaction_defaults_to_pending() -> Result<()> {
        let store = setup_sql_store().await?;
        let created = store
            .insert_transaction(&new_transaction_fixture(TransactionKind::Outflow, 3500.0))
            .await?;
        assert_eq!(created.status, TransactionStatus::Pending);
        assert_eq!(created.kind, TransactionKind::Outflow);

        let raw = TransactionEntity::find_by_id(created.id).one(store.connection()).await?.unwrap();
        assert_eq!(raw.kind, "saida");
        assert_eq!(raw.status, "pendente");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_customers_with_mock_database() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![customer::Model {
                id: 1,
                name: "Maria Silva".to_string(),
                email: "maria@email.com".to_string(),
                phone: "(11) 99999-0001".to_string(),
                city: "São Paulo".to_string(),
                total_purchases: Some(5),
            }]])
            .into_connection();
        let store = SqlStore::new(db);

        let customers = store.list_customers().await?;
        assert_eq!(customers.len(), 1);
        assert!(customers[0].is_active());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_error_is_propagated() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = SqlStore::new(db);

        let result = store.list_customers().await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_inventory_level_is_unique_per_product() -> Result<()> {
        let store = setup_sql_store().await?;
        let row = insert_product_row(&store, "EST-PR-01", "Estojo Premium Couro", 15).await?;
        insert_inventory_level(&store, row.id, 45).await?;
        let duplicate = inventory_level::ActiveModel {
            product_id: Set(row.id),
            quantity: Set(1),
            ..Default::default()
        }
        .insert(store.connection())
        .await;
        assert!(duplicate.is_err());
        Ok(())
    }
}
