//! Storage access: projection queries, registry scan, and liveness ping.
//!
//! One `Storage` service wraps the shared `PgPool`. Every read collects the
//! full row set with `fetch_all` before anything is returned, so a query or
//! row-decode failure on any row discards the whole result — no partial
//! responses leave this layer.
//!
//! Postgres cannot bind table identifiers, so resolved shard names are
//! interpolated into the SQL text inside quoted identifiers. Everything
//! reaching that point came through the validator and resolver and is
//! limited to digits, dashes, and the fixed month names.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::GatewayError;
use crate::models::{InventoryEntry, ObservationRecord, PermitRecord};
use crate::shard::{QueryTarget, INVENTORY_TABLE};

/// Column projection for permit tables. The storage side uses PascalCase
/// identifiers from the ingestion pipeline; aliases pin them to the record
/// fields.
const PERMIT_COLUMNS: &str = r#"
    "PermitID" AS permit_id,
    "PermitNumber" AS permit_number,
    "PermitType" AS permit_type,
    "PermitSubtype" AS permit_subtype,
    "Status" AS status,
    "FileDate" AS file_date,
    "IssueDate" AS issue_date,
    "FinalDate" AS final_date,
    "ApprovalDuration" AS approval_duration,
    "ConstructionDuration" AS construction_duration,
    "TotalDuration" AS total_duration,
    "ApprovalRatio" AS approval_ratio,
    "ConstructionRatio" AS construction_ratio,
    "DurationCategory" AS duration_category,
    "BottleneckPhase" AS bottleneck_phase,
    "PropertyType" AS property_type,
    "JobValue" AS job_value,
    "TimeOnly" AS time_only"#;

const OBSERVATION_COLUMNS: &str = "id, sighting_date, common_name, scientific_name, \
     life_stage, number_observed, town, state_province, latitude, longitude, observer_notes";

fn observation_query(table: &str) -> String {
    format!(r#"SELECT {OBSERVATION_COLUMNS} FROM "{table}" ORDER BY sighting_date"#)
}

fn permit_shard_query(table: &str) -> String {
    format!(r#"SELECT {PERMIT_COLUMNS} FROM "{table}" ORDER BY "IssueDate""#)
}

fn permit_window_query(table: &str) -> String {
    format!(
        r#"SELECT {PERMIT_COLUMNS} FROM "{table}"
        WHERE "FileDate" >= $1::date AND "FileDate" < $2::date
        ORDER BY "IssueDate""#
    )
}

fn inventory_query() -> String {
    // Full scan of the registry, no filter and no guaranteed ordering.
    format!("SELECT id, available_date, table_name, processed_at, record_count FROM {INVENTORY_TABLE}")
}

/// Read-only storage service shared by all request handlers.
#[derive(Clone, Debug)]
pub struct Storage {
    pool: PgPool,
}

impl Storage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a storage service without connecting. Connections are opened
    /// on first use, which lets router tests exercise the no-backend paths.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Liveness check. Touches no shard table and mutates nothing.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.map(|_| ())
    }

    /// Scan one per-day observation shard in full, ordered by sighting date.
    pub async fn scan_observations(
        &self,
        table: &str,
    ) -> Result<Vec<ObservationRecord>, GatewayError> {
        sqlx::query_as::<_, ObservationRecord>(&observation_query(table))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GatewayError::backend(table, e))
    }

    /// Scan permits from a resolved range shard or the static filtered table.
    pub async fn scan_permits(
        &self,
        target: &QueryTarget,
    ) -> Result<Vec<PermitRecord>, GatewayError> {
        match target {
            QueryTarget::Table(table) => {
                sqlx::query_as::<_, PermitRecord>(&permit_shard_query(table))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| GatewayError::backend(table.clone(), e))
            }
            QueryTarget::Filtered { table, start, end } => {
                sqlx::query_as::<_, PermitRecord>(&permit_window_query(table))
                    .bind(start)
                    .bind(end)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| GatewayError::backend(*table, e))
            }
        }
    }

    /// Read the whole shard registry.
    pub async fn fetch_inventory(&self) -> Result<Vec<InventoryEntry>, GatewayError> {
        sqlx::query_as::<_, InventoryEntry>(&inventory_query())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GatewayError::backend(INVENTORY_TABLE, e))
    }
}
