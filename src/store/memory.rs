//! In-memory store.
//!
//! Serves the seed records when no endpoint is configured, and backs the
//! query and mutation tests. Reads and writes can be made to fail on demand.

use crate::{
    core::{
        customer::{Customer, NewCustomer},
        finance::{FinancialTransaction, NewTransaction},
        product::{NewProduct, Product},
        sale::{NewSale, SalesOrder},
        seed,
    },
    errors::{Error, Result},
    store::RemoteStore,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    customers: Vec<Customer>,
    sales_orders: Vec<SalesOrder>,
    transactions: Vec<FinancialTransaction>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the seed records.
    #[must_use]
    pub fn seeded() -> Self {
        let tables = Tables {
            products: seed::products(),
            customers: seed::customers(),
            sales_orders: seed::sales_orders(),
            transactions: seed::financial_transactions(),
            next_id: 100,
        };
        Self {
            tables: RwLock::new(tables),
            ..Self::default()
        }
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent insert fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of list calls served so far, failed ones included.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn begin_read(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Transport("memory store is offline".to_string()));
        }
        Ok(())
    }

    fn begin_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Http {
                status: 409,
                message: "duplicate key value violates unique constraint".to_string(),
            });
        }
        Ok(())
    }
}

impl RemoteStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.begin_read()?;
        let mut products = self.tables.read().await.products.clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.begin_read()?;
        let mut customers = self.tables.read().await.customers.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn list_sales_orders(&self) -> Result<Vec<SalesOrder>> {
        self.begin_read()?;
        let mut orders = self.tables.read().await.sales_orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list_financial_transactions(&self) -> Result<Vec<FinancialTransaction>> {
        self.begin_read()?;
        let mut transactions = self.tables.read().await.transactions.clone();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    #[instrument(skip(self, payload), fields(sku = %payload.sku))]
    async fn insert_product(&self, payload: &NewProduct) -> Result<Product> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let product = Product {
            id: tables.allocate_id(),
            sku: payload.sku.trim().to_string(),
            name: payload.name.trim().to_string(),
            category: payload.category.trim().to_string(),
            brand: payload.brand.trim().to_string(),
            price: payload.price,
            min_stock: payload.min_stock,
            stock: 0,
            is_active: true,
        };
        tables.products.push(product.clone());
        debug!("Stored product {}", product.id);
        Ok(product)
    }

    #[instrument(skip(self, payload))]
    async fn insert_customer(&self, payload: &NewCustomer) -> Result<Customer> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let customer = Customer {
            id: tables.allocate_id(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone.clone().unwrap_or_default(),
            city: payload.city.clone().unwrap_or_default(),
            total_purchases: None,
        };
        tables.customers.push(customer.clone());
        debug!("Stored customer {}", customer.id);
        Ok(customer)
    }

    #[instrument(skip(self, payload))]
    async fn insert_sale(&self, payload: &NewSale) -> Result<SalesOrder> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let order = SalesOrder {
            id: tables.allocate_id(),
            customer_id: payload.customer_id,
            status: payload.status,
            payment_method: Some(payload.payment_method.trim().to_string()),
            total: payload.total,
            notes: payload.notes().map(ToString::to_string),
            created_at: chrono::Utc::now(),
        };
        tables.sales_orders.push(order.clone());
        debug!("Stored sales order {}", order.id);
        Ok(order)
    }

    #[instrument(skip(self, payload))]
    async fn insert_transaction(&self, payload: &NewTransaction) -> Result<FinancialTransaction> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let transaction = FinancialTransaction {
            id: tables.allocate_id(),
            kind: payload.kind,
            category: payload.category.trim().to_string(),
            amount: payload.amount,
            related_order_id: payload.related_order_id,
            status: payload.status(),
            description: payload.description().map(ToString::to_string),
            created_at: chrono::Utc::now(),
        };
        tables.transactions.push(transaction.clone());
        debug!("Stored transaction {}", transaction.id);
        Ok(transaction)
    }
}
