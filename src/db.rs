use std::sync::Arc;

use sqlx::MySqlPool;

use crate::store::MySqlStore;

/// Connects the pool and wraps it in the production store.
pub async fn init_store(database_url: &str) -> Arc<MySqlStore> {
    let pool = MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database");
    Arc::new(MySqlStore::new(pool))
}
