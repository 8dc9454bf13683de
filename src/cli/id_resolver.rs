//! Short ID prefix resolution.
//!
//! Any unique prefix of a task UUID is accepted in place of the full id,
//! similar to git short hashes.

use anyhow::{bail, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

const TASK_QUERY: &str = "SELECT id FROM tasks WHERE id LIKE ? ORDER BY id LIMIT 11";

/// Resolve a task ID prefix to a full UUID.
pub async fn resolve_task_id(pool: &SqlitePool, prefix: &str) -> Result<Uuid> {
    let prefix = prefix.trim();

    // Fast path: a full UUID needs no lookup
    if let Ok(uuid) = Uuid::parse_str(prefix) {
        return Ok(uuid);
    }

    validate_prefix(prefix)?;

    let pattern = format!("{}%", prefix.to_lowercase());
    let rows: Vec<(String,)> = sqlx::query_as(TASK_QUERY).bind(&pattern).fetch_all(pool).await?;

    match rows.as_slice() {
        [] => bail!("No task found matching '{prefix}'"),
        [(id,)] => Ok(Uuid::parse_str(id)?),
        matches => {
            let mut msg = format!("Ambiguous prefix '{prefix}': matches several tasks:");
            for (id,) in matches.iter().take(10) {
                msg.push_str(&format!("\n  {id}"));
            }
            bail!("{msg}")
        }
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        bail!("ID prefix must not be empty");
    }
    if !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        bail!("Invalid ID prefix '{prefix}': must contain only hex characters and dashes");
    }
    Ok(())
}
