// ==========================================
// BOQ 策略模板迁移工具 - SQLite 策略记录源
// ==========================================
// 职责: 执行配置中的导出查询 / 重复检查查询
// 说明: 视图 PolicyVARExportForBOQ / AssetPolicyVARDuplicates 对应旧系统存储过程
// ==========================================

use crate::config::ExportConfig;
use crate::db::open_sqlite_connection;
use crate::exporter::error::ExportResult;
use crate::exporter::policy_source::{ExportTable, PolicyRecordSource};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

pub struct SqliteRecordSource {
    conn: Connection,
    export_query: String,
    duplicate_query: String,
}

impl SqliteRecordSource {
    pub fn open(config: &ExportConfig) -> ExportResult<Self> {
        let conn = open_sqlite_connection(&config.database_path)?;
        Ok(Self::from_connection(
            conn,
            &config.export_query,
            &config.duplicate_query,
        ))
    }

    pub fn from_connection(conn: Connection, export_query: &str, duplicate_query: &str) -> Self {
        Self {
            conn,
            export_query: export_query.to_string(),
            duplicate_query: duplicate_query.to_string(),
        }
    }
}

impl PolicyRecordSource for SqliteRecordSource {
    fn has_duplicate_records(&self) -> ExportResult<bool> {
        debug!(sql = %self.duplicate_query, "执行重复记录检查");
        let mut stmt = self.conn.prepare(&self.duplicate_query)?;
        let mut rows = stmt.query([])?;
        Ok(rows.next()?.is_some())
    }

    fn fetch_export_table(&self) -> ExportResult<ExportTable> {
        debug!(sql = %self.export_query, "执行导出查询");
        let mut stmt = self.conn.prepare(&self.export_query)?;
        let headers: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let column_count = headers.len();

        let mut table = ExportTable {
            headers,
            rows: Vec::new(),
        };

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(value_to_cell(row.get_ref(idx)?));
            }
            table.rows.push(values);
        }

        Ok(table)
    }
}

fn value_to_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => b.iter().map(|byte| format!("{:02X}", byte)).collect(),
    }
}
