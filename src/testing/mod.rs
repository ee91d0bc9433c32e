#![cfg(test)]
use crate::*;
use test_context::TestContext;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

/// A small shop catalog: orders reference customers, items reference orders
/// and products, customers and regions share `region_code`.
pub(crate) fn shop_schema() -> SchemaSnapshot {
    SchemaSnapshot::new()
        .with_table(
            "orders",
            ["id", "customer_id", "total", "status", "created_at"],
        )
        .with_table("customers", ["id", "name", "email", "region_code"])
        .with_table("order_items", ["id", "order_id", "product_id", "quantity"])
        .with_table("products", ["id", "name", "price"])
        .with_table("regions", ["region_code", "name"])
}

/// An engine on default settings plus the shop catalog.
pub(crate) struct ShopContext {
    pub engine: Engine,
    pub schema: SchemaSnapshot,
}

impl ShopContext {
    /// Labels suggested with the cursor at the first `|` in `marked`, which
    /// is removed from the buffer.
    pub fn labels(&self, marked: &str) -> Vec<String> {
        let (sql, cursor) = split_marker(marked);
        self.engine
            .suggest(&sql, cursor, &self.schema)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl TestContext for ShopContext {
    fn setup() -> Self {
        common_init();
        Self {
            engine: Engine::new(Config::fallback()),
            schema: shop_schema(),
        }
    }
}

/// Remove the cursor marker `|` and return the buffer and its offset. A
/// buffer without a marker puts the cursor at the end.
pub(crate) fn split_marker(marked: &str) -> (String, usize) {
    match marked.find('|') {
        Some(at) => (marked.replacen('|', "", 1), at),
        None => (marked.to_string(), marked.len()),
    }
}
