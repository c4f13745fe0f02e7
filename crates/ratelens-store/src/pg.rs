//! PostgreSQL-backed rate store.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use deadpool_diesel::postgres::{Manager, Pool};
use deadpool_diesel::{ManagerConfig, RecyclingMethod};
use diesel::dsl::{count_distinct, max, min};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ratelens_types::SeriesTable;

use crate::models::{NewRate, NewUpload, UploadRow};
use crate::schema::{csv_uploads, exchange_rates};
use crate::{
    ImportAudit, RECENT_UPLOADS, RateRepository, Result, StoreError, StoreStats, StoredSpan,
    UploadSummary,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Rows per `INSERT` statement; three bind parameters each keeps every
/// statement under the PostgreSQL limit of 65535.
const UPSERT_CHUNK: usize = 10_000;

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: usize = 16;

/// Rate store on a pooled PostgreSQL connection.
#[derive(Clone)]
pub struct PgRateStore {
    pool: Pool,
}

impl std::fmt::Debug for PgRateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRateStore")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl PgRateStore {
    /// Builds a connection pool for `database_url`.
    ///
    /// Connections are opened lazily, so an unreachable server surfaces on
    /// first use rather than here.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built.
    pub fn connect(database_url: &str, pool_size: usize) -> Result<Self> {
        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(database_url, deadpool_diesel::Runtime::Tokio1, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(pool_size.max(1))
            .build()
            .map_err(|e| StoreError::Pool(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Applies pending migrations, returning the versions applied.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or a migration fails.
    pub async fn migrate(&self) -> Result<Vec<String>> {
        let conn = self.pool.get().await?;
        let applied = conn
            .interact(|conn| {
                conn.run_pending_migrations(MIGRATIONS)
                    .map(|versions| versions.iter().map(ToString::to_string).collect::<Vec<_>>())
                    .map_err(|e| e.to_string())
            })
            .await?
            .map_err(StoreError::Migration)?;

        if applied.is_empty() {
            tracing::info!("No pending migrations to apply");
        } else {
            for version in &applied {
                tracing::info!(%version, "Applied migration");
            }
        }
        Ok(applied)
    }
}

#[async_trait]
impl RateRepository for PgRateStore {
    async fn save_import(&self, source: &str, table: &SeriesTable) -> Result<Option<ImportAudit>> {
        let Some(audit) = ImportAudit::from_table(source, table, Utc::now().naive_utc()) else {
            tracing::debug!(source, "Nothing to store");
            return Ok(None);
        };

        let rows = NewRate::from_table(table)?;
        let upload = NewUpload::try_from(&audit)?;
        let conn = self.pool.get().await?;

        conn.interact(move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                for chunk in rows.chunks(UPSERT_CHUNK) {
                    diesel::insert_into(exchange_rates::table)
                        .values(chunk)
                        .on_conflict((exchange_rates::date, exchange_rates::currency))
                        .do_update()
                        .set(exchange_rates::rate.eq(excluded(exchange_rates::rate)))
                        .execute(conn)?;
                }

                diesel::insert_into(csv_uploads::table)
                    .values(&upload)
                    .execute(conn)?;

                Ok(())
            })
        })
        .await??;

        tracing::info!(
            source = %audit.source,
            records = audit.record_count,
            start = %audit.start,
            end = %audit.end,
            "Stored import"
        );
        Ok(Some(audit))
    }

    async fn stats(&self) -> Result<StoreStats> {
        let conn = self.pool.get().await?;

        let (total_records, unique_currencies, (start, end), uploads) = conn
            .interact(|conn| {
                let total: i64 = exchange_rates::table.count().get_result(conn)?;
                let distinct: i64 = exchange_rates::table
                    .select(count_distinct(exchange_rates::currency))
                    .get_result(conn)?;
                let span: (Option<NaiveDate>, Option<NaiveDate>) = exchange_rates::table
                    .select((min(exchange_rates::date), max(exchange_rates::date)))
                    .get_result(conn)?;
                let uploads: Vec<UploadRow> = csv_uploads::table
                    .order(csv_uploads::upload_date.desc())
                    .limit(RECENT_UPLOADS as i64)
                    .select(UploadRow::as_select())
                    .load(conn)?;
                Ok::<_, diesel::result::Error>((total, distinct, span, uploads))
            })
            .await??;

        Ok(StoreStats {
            total_records,
            unique_currencies,
            date_range: StoredSpan { start, end },
            recent_uploads: uploads.into_iter().map(UploadSummary::from).collect(),
        })
    }
}
