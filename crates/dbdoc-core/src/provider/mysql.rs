//! MySQL/MariaDB introspection provider
//!
//! Uses SQLx against `information_schema`. Queries run one at a time on a
//! private current-thread runtime, so callers stay synchronous.

use std::time::Duration;

use chrono::NaiveDateTime;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::SchemaProvider;
use crate::error::{Error, Result};
use crate::schema::{ColumnInfo, TableInfo};

/// Connection timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Character set requested for the session.
const CHARSET: &str = "utf8mb4";

/// Format of timestamps in `information_schema` once cast to text.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LIST_TABLES_SQL: &str = r#"
    SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME
"#;

const TABLE_STATUS_SQL: &str = r#"
    SELECT
        CAST(TABLE_NAME AS CHAR) AS TABLE_NAME,
        CAST(ENGINE AS CHAR) AS ENGINE,
        CAST(VERSION AS UNSIGNED) AS VERSION,
        CAST(ROW_FORMAT AS CHAR) AS ROW_FORMAT,
        CAST(TABLE_ROWS AS UNSIGNED) AS TABLE_ROWS,
        CAST(AVG_ROW_LENGTH AS UNSIGNED) AS AVG_ROW_LENGTH,
        CAST(DATA_LENGTH AS UNSIGNED) AS DATA_LENGTH,
        CAST(MAX_DATA_LENGTH AS UNSIGNED) AS MAX_DATA_LENGTH,
        CAST(INDEX_LENGTH AS UNSIGNED) AS INDEX_LENGTH,
        CAST(DATA_FREE AS UNSIGNED) AS DATA_FREE,
        CAST(AUTO_INCREMENT AS UNSIGNED) AS AUTO_INCREMENT,
        CAST(CREATE_TIME AS CHAR) AS CREATE_TIME,
        CAST(UPDATE_TIME AS CHAR) AS UPDATE_TIME,
        CAST(CHECK_TIME AS CHAR) AS CHECK_TIME,
        CAST(TABLE_COLLATION AS CHAR) AS TABLE_COLLATION,
        CAST(CHECKSUM AS UNSIGNED) AS CHECKSUM,
        CAST(CREATE_OPTIONS AS CHAR) AS CREATE_OPTIONS,
        CAST(TABLE_COMMENT AS CHAR) AS TABLE_COMMENT
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
"#;

const COLUMNS_SQL: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
        CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
        CAST(COLLATION_NAME AS CHAR) AS COLLATION_NAME,
        CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE,
        CAST(COLUMN_KEY AS CHAR) AS COLUMN_KEY,
        CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
        CAST(EXTRA AS CHAR) AS EXTRA,
        CAST(PRIVILEGES AS CHAR) AS PRIVILEGES,
        CAST(COLUMN_COMMENT AS CHAR) AS COLUMN_COMMENT
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// Where and as whom to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "test".to_string(),
        }
    }
}

impl ConnectionParams {
    /// Connection URL without the password, safe to log
    pub fn display_url(&self) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// Live MySQL/MariaDB schema provider
pub struct MysqlProvider {
    runtime: Runtime,
    pool: MySqlPool,
    database: String,
}

impl MysqlProvider {
    /// Connect and verify the connection with a trivial query
    pub fn connect(params: &ConnectionParams) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let options = MySqlConnectOptions::new()
            .host(&params.host)
            .port(params.port)
            .username(&params.user)
            .password(&params.password)
            .database(&params.database)
            .charset(CHARSET);

        let pool = runtime
            .block_on(
                MySqlPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(CONNECT_TIMEOUT)
                    .connect_with(options),
            )
            .map_err(|e| {
                Error::provider_with_source(format!("connecting to {}", params.display_url()), e)
            })?;

        runtime
            .block_on(sqlx::query("SELECT 1").fetch_one(&pool))
            .map_err(|e| Error::provider_with_source("testing MySQL connection", e))?;

        info!(url = %params.display_url(), "Connected to MySQL");

        Ok(Self {
            runtime,
            pool,
            database: params.database.clone(),
        })
    }

    fn fetch_all(&self, sql: &str, binds: &[&str], context: &str) -> Result<Vec<MySqlRow>> {
        let mut query = sqlx::query(sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        self.runtime
            .block_on(query.fetch_all(&self.pool))
            .map_err(|e| Error::provider_with_source(context.to_string(), e))
    }
}

impl SchemaProvider for MysqlProvider {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows = self.fetch_all(LIST_TABLES_SQL, &[self.database.as_str()], "listing tables")?;
        let tables = rows
            .iter()
            .map(|row| column::<String>(row, "TABLE_NAME"))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = tables.len(), database = %self.database, "Listed tables");
        Ok(tables)
    }

    fn table_info(&mut self, name: &str) -> Result<TableInfo> {
        let context = format!("reading status of table {}", name);
        let rows = self.fetch_all(TABLE_STATUS_SQL, &[self.database.as_str(), name], &context)?;
        let row = rows.first().ok_or_else(|| {
            Error::provider(format!("table {} not found in {}", name, self.database))
        })?;

        Ok(TableInfo {
            name: column(row, "TABLE_NAME")?,
            engine: column(row, "ENGINE")?,
            version: column(row, "VERSION")?,
            row_format: column(row, "ROW_FORMAT")?,
            rows: column(row, "TABLE_ROWS")?,
            avg_row_length: column(row, "AVG_ROW_LENGTH")?,
            data_length: column(row, "DATA_LENGTH")?,
            max_data_length: column(row, "MAX_DATA_LENGTH")?,
            index_length: column(row, "INDEX_LENGTH")?,
            data_free: column(row, "DATA_FREE")?,
            auto_increment: column(row, "AUTO_INCREMENT")?,
            create_time: timestamp(row, "CREATE_TIME")?,
            update_time: timestamp(row, "UPDATE_TIME")?,
            check_time: timestamp(row, "CHECK_TIME")?,
            collation: column(row, "TABLE_COLLATION")?,
            checksum: column(row, "CHECKSUM")?,
            create_options: column(row, "CREATE_OPTIONS")?,
            comment: column::<Option<String>>(row, "TABLE_COMMENT")?.unwrap_or_default(),
        })
    }

    fn columns(&mut self, name: &str) -> Result<Vec<ColumnInfo>> {
        let context = format!("reading columns of table {}", name);
        let rows = self.fetch_all(COLUMNS_SQL, &[self.database.as_str(), name], &context)?;
        if rows.is_empty() {
            return Err(Error::provider(format!(
                "table {} not found in {}",
                name, self.database
            )));
        }

        rows.iter()
            .map(|row| {
                Ok(ColumnInfo {
                    name: column(row, "COLUMN_NAME")?,
                    field_type: column(row, "COLUMN_TYPE")?,
                    collation: column(row, "COLLATION_NAME")?,
                    nullable: column(row, "IS_NULLABLE")?,
                    key: text(row, "COLUMN_KEY")?,
                    default: column(row, "COLUMN_DEFAULT")?,
                    extra: text(row, "EXTRA")?,
                    privileges: text(row, "PRIVILEGES")?,
                    comment: text(row, "COLUMN_COMMENT")?,
                })
            })
            .collect()
    }
}

fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| Error::provider_with_source(format!("decoding column {}", name), e))
}

/// Text column where NULL reads as empty
fn text(row: &MySqlRow, name: &str) -> Result<String> {
    Ok(column::<Option<String>>(row, name)?.unwrap_or_default())
}

fn timestamp(row: &MySqlRow, name: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = column(row, name)?;
    Ok(raw.and_then(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_url_hides_password() {
        let params = ConnectionParams {
            password: "hunter2".to_string(),
            ..ConnectionParams::default()
        };
        let url = params.display_url();
        assert_eq!(url, "mysql://root@localhost:3306/test");
        assert!(!url.contains("hunter2"));
    }

    #[test]
    fn test_queries_bind_schema_and_table() {
        assert_eq!(LIST_TABLES_SQL.matches('?').count(), 1);
        assert_eq!(TABLE_STATUS_SQL.matches('?').count(), 2);
        assert_eq!(COLUMNS_SQL.matches('?').count(), 2);
        assert!(COLUMNS_SQL.contains("ORDER BY ORDINAL_POSITION"));
    }
}
