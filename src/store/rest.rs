//! REST backend for the hosted database's auto-generated HTTP API.
//!
//! Every table is served at `<base>/rest/v1/<table>`. Requests carry the
//! publishable key twice (as `apikey` and as a bearer token) and select the
//! schema through the profile headers. ureq is blocking, so each request runs
//! on tokio's blocking pool.

use crate::{
    core::{
        customer::{Customer, NewCustomer},
        finance::{FinancialTransaction, NewTransaction},
        product::{NewProduct, Product},
        sale::{NewSale, SalesOrder},
    },
    entities::{customer, financial_transaction, product, sales_order},
    errors::{Error, Result},
    store::{RemoteStore, decode_each},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, instrument};

const API_PATH: &str = "rest/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Product columns plus the embedded inventory quantity.
const PRODUCT_SELECT: &str = "*,inventory_levels(quantity)";

/// One read: which table, which columns, in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadQuery {
    pub table: &'static str,
    pub select: &'static str,
    pub order: &'static str,
}

impl ReadQuery {
    pub const PRODUCTS: Self = Self {
        table: "products",
        select: PRODUCT_SELECT,
        order: "name.asc",
    };
    pub const CUSTOMERS: Self = Self {
        table: "customers",
        select: "*",
        order: "name.asc",
    };
    pub const SALES_ORDERS: Self = Self {
        table: "sales_orders",
        select: "*",
        order: "created_at.desc",
    };
    pub const FINANCIAL_TRANSACTIONS: Self = Self {
        table: "financial_transactions",
        select: "*",
        order: "created_at.desc",
    };
}

#[derive(Debug, Clone)]
pub struct RestStore {
    base_url: String,
    api_key: String,
    schema: String,
    agent: ureq::Agent,
}

impl RestStore {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str, schema: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            schema: schema.to_string(),
            agent,
        }
    }

    /// Endpoint of `table`.
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{API_PATH}/{table}", self.base_url)
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.api_key.clone()),
            ("Authorization", format!("Bearer {}", self.api_key)),
            ("Accept-Profile", self.schema.clone()),
            ("Content-Profile", self.schema.clone()),
        ]
    }

    #[instrument(skip(self), fields(table = query.table))]
    async fn fetch(&self, query: ReadQuery) -> Result<String> {
        let mut request = self
            .agent
            .get(&self.table_url(query.table))
            .query("select", query.select)
            .query("order", query.order);
        for (name, value) in self.headers() {
            request = request.set(name, &value);
        }

        let body = tokio::task::spawn_blocking(move || -> Result<String> {
            Ok(request.call()?.into_string()?)
        })
        .await??;
        debug!("Read {} bytes from {}", body.len(), query.table);
        Ok(body)
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &'static str, row: Value) -> Result<String> {
        let mut request = self
            .agent
            .post(&self.table_url(table))
            .set("Prefer", "return=representation");
        for (name, value) in self.headers() {
            request = request.set(name, &value);
        }

        let body = tokio::task::spawn_blocking(move || -> Result<String> {
            Ok(request.send_json(row)?.into_string()?)
        })
        .await??;
        info!("Inserted one row into {}", table);
        Ok(body)
    }
}

/// The inventory embed comes back as an object for a one-to-one relation
/// and as an array when the relation cannot be proven unique.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InventoryEmbed {
    One(LevelRow),
    Many(Vec<LevelRow>),
}

#[derive(Debug, Deserialize)]
struct LevelRow {
    quantity: i32,
}

impl InventoryEmbed {
    fn quantity(&self) -> Option<i32> {
        match self {
            Self::One(level) => Some(level.quantity),
            Self::Many(levels) => levels.first().map(|l| l.quantity),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    #[serde(flatten)]
    product: product::Model,
    #[serde(default)]
    inventory_levels: Option<InventoryEmbed>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let quantity = row.inventory_levels.as_ref().and_then(InventoryEmbed::quantity);
        Self::from_storage(row.product, quantity)
    }
}

fn decode_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    Ok(serde_json::from_str(body)?)
}

/// Inserts answer with the created rows; exactly one is expected.
fn decode_created<T: DeserializeOwned>(body: &str, table: &str) -> Result<T> {
    decode_rows::<T>(body)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyInsert {
            table: table.to_string(),
        })
}

pub(crate) fn decode_products(body: &str) -> Result<Vec<Product>> {
    Ok(decode_rows::<ProductRow>(body)?
        .into_iter()
        .map(Product::from)
        .collect())
}

pub(crate) fn decode_customers(body: &str) -> Result<Vec<Customer>> {
    Ok(decode_rows::<customer::Model>(body)?
        .into_iter()
        .map(Customer::from)
        .collect())
}

pub(crate) fn decode_sales_orders(body: &str) -> Result<Vec<SalesOrder>> {
    let rows = decode_rows::<sales_order::Model>(body)?;
    Ok(decode_each(rows, ReadQuery::SALES_ORDERS.table))
}

pub(crate) fn decode_transactions(body: &str) -> Result<Vec<FinancialTransaction>> {
    let rows = decode_rows::<financial_transaction::Model>(body)?;
    Ok(decode_each(rows, ReadQuery::FINANCIAL_TRANSACTIONS.table))
}

/// JSON has no NaN or infinity; such an amount would be sent as `null`.
fn money(amount: f64) -> Result<Value> {
    serde_json::Number::from_f64(amount)
        .map(Value::Number)
        .ok_or(Error::InvalidAmount { amount })
}

pub(crate) fn product_body(payload: &NewProduct) -> Result<Value> {
    Ok(json!({
        "sku": payload.sku.trim(),
        "name": payload.name.trim(),
        "category": payload.category.trim(),
        "brand": payload.brand.trim(),
        "min_stock": payload.min_stock,
        "price": money(payload.price)?,
        "is_active": true,
    }))
}

pub(crate) fn customer_body(payload: &NewCustomer) -> Value {
    json!({
        "name": payload.name.trim(),
        "email": payload.email.trim(),
        "phone": payload.phone.as_deref().map(str::trim),
        "city": payload.city.as_deref().map(str::trim),
    })
}

pub(crate) fn sale_body(payload: &NewSale) -> Result<Value> {
    Ok(json!({
        "customer_id": payload.customer_id,
        "status": payload.status.as_str(),
        "payment_method": payload.payment_method.trim(),
        "total": money(payload.total)?,
        "notes": payload.notes(),
    }))
}

pub(crate) fn transaction_body(payload: &NewTransaction) -> Result<Value> {
    Ok(json!({
        "kind": payload.kind.as_str(),
        "category": payload.category.trim(),
        "amount": money(payload.amount)?,
        "related_order_id": payload.related_order_id,
        "status": payload.status().as_str(),
        "description": payload.description(),
    }))
}

impl RemoteStore for RestStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        decode_products(&self.fetch(ReadQuery::PRODUCTS).await?)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        decode_customers(&self.fetch(ReadQuery::CUSTOMERS).await?)
    }

    async fn list_sales_orders(&self) -> Result<Vec<SalesOrder>> {
        decode_sales_orders(&self.fetch(ReadQuery::SALES_ORDERS).await?)
    }

    async fn list_financial_transactions(&self) -> Result<Vec<FinancialTransaction>> {
        decode_transactions(&self.fetch(ReadQuery::FINANCIAL_TRANSACTIONS).await?)
    }

    async fn insert_product(&self, payload: &NewProduct) -> Result<Product> {
        let table = ReadQuery::PRODUCTS.table;
        let body = self.insert(table, product_body(payload)?).await?;
        Ok(Product::from(decode_created::<ProductRow>(&body, table)?))
    }

    async fn insert_customer(&self, payload: &NewCustomer) -> Result<Customer> {
        let table = ReadQuery::CUSTOMERS.table;
        let body = self.insert(table, customer_body(payload)).await?;
        Ok(Customer::from(decode_created::<customer::Model>(&body, table)?))
    }

    async fn insert_sale(&self, payload: &NewSale) -> Result<SalesOrder> {
        let table = ReadQuery::SALES_ORDERS.table;
        let body = self.insert(table, sale_body(payload)?).await?;
        SalesOrder::try_from(decode_created::<sales_order::Model>(&body, table)?)
    }

    async fn insert_transaction(&self, payload: &NewTransaction) -> Result<FinancialTransaction> {
        let table = ReadQuery::FINANCIAL_TRANSACTIONS.table;
        let body = self.insert(table, transaction_body(payload)?).await?;
        FinancialTransaction::try_from(decode_created::<financial_transaction::Model>(
            &body, table,
        )?)
    }
}
