//! Product rows read by the barcode exporter.

use rusqlite::ToSql;
use rusqlite::types::ValueRef;

use crate::{Database, DbError};

/// One row of the `products` relation, with every column coerced to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub water_ml: String,
}

impl Database {
    /// Fetch every product as `(barcode, name, water_ml)` in storage order.
    pub fn list_products(&self) -> Result<Vec<Product>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT barcode, name, water_ml FROM products")?;
            let rows = stmt.query_map([], |row| {
                Ok(Product {
                    barcode: value_to_text(row.get_ref(0)?),
                    name: value_to_text(row.get_ref(1)?),
                    water_ml: value_to_text(row.get_ref(2)?),
                })
            })?;
            let products = rows.collect::<Result<Vec<_>, _>>()?;
            tracing::debug!(count = products.len(), "Loaded products");
            Ok(products)
        })
    }

    /// Insert a product row. Values keep whatever SQLite type the caller binds.
    pub fn insert_product(
        &self,
        barcode: impl ToSql,
        name: &str,
        water_ml: impl ToSql,
    ) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO products (barcode, name, water_ml) VALUES (?1, ?2, ?3)",
                rusqlite::params![barcode, name, water_ml],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

/// Render any SQLite value the way it would print as text.
fn value_to_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}
