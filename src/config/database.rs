//! Database schema setup for the SQL backend.
//!
//! Tables are generated from the entity definitions with `SeaORM`'s
//! `Schema::create_table_from_entity`, so the local schema always matches the
//! Rust structs without hand-written SQL. Creation is idempotent.

use crate::entities::{Customer, FinancialTransaction, InventoryLevel, Product, SalesOrder};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

/// Creates every table the dashboard reads, skipping those that exist.
///
/// Products come before inventory levels because of the foreign key.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, Product).await?;
    create_table(db, &schema, InventoryLevel).await?;
    create_table(db, &schema, Customer).await?;
    create_table(db, &schema, SalesOrder).await?;
    create_table(db, &schema, FinancialTransaction).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    debug!("Ensured table '{}'", entity.table_name());
    Ok(())
}
