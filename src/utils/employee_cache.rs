use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use once_cell::sync::Lazy;

use crate::store::EmployeeStore;

/// employee id -> display name, for decorating the manager approval queue
pub static EMPLOYEE_NAME_CACHE: Lazy<Cache<String, String>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Resolve a display name, falling back to the store on a cache miss. A
/// lookup failure degrades to `None` rather than failing the queue.
pub async fn display_name(store: &dyn EmployeeStore, employee_id: &str) -> Option<String> {
    if let Some(name) = EMPLOYEE_NAME_CACHE.get(employee_id).await {
        return Some(name);
    }

    match store.get(employee_id).await {
        Ok(Some(employee)) => {
            let name = employee.display_name();
            EMPLOYEE_NAME_CACHE
                .insert(employee_id.to_string(), name.clone())
                .await;
            Some(name)
        }
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, employee_id, "Employee lookup failed");
            None
        }
    }
}

/// Batch insert a chunk of names concurrently
async fn batch_remember(names: &[(String, String)]) {
    let futures: Vec<_> = names
        .iter()
        .map(|(id, name)| EMPLOYEE_NAME_CACHE.insert(id.clone(), name.clone()))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load the employee directory into the in-memory cache (batched)
pub async fn warmup_employee_cache(store: &dyn EmployeeStore, batch_size: usize) -> Result<()> {
    let employees = store.list(None).await?;
    let total_count = employees.len();

    let names: Vec<(String, String)> = employees
        .into_iter()
        .map(|employee| {
            let name = employee.display_name();
            (employee.id, name)
        })
        .collect();

    for chunk in names.chunks(batch_size.max(1)) {
        batch_remember(chunk).await;
    }

    tracing::info!(
        "Employee name cache warmup complete: {} employees",
        total_count
    );

    Ok(())
}
