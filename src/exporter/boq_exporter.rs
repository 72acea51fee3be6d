// ==========================================
// BOQ 策略模板迁移工具 - BOQ 导出器
// ==========================================
// 流程: 重复记录检查 → 读取导出记录 → 写 CSV（表头 + 行）
// 红线: 存在重复记录时拒绝导出
// ==========================================

use crate::config::ExportConfig;
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::policy_source::PolicyRecordSource;
use crate::exporter::sqlite_source::SqliteRecordSource;
use csv::Writer;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub struct BoqExporter<S: PolicyRecordSource> {
    source: S,
    target: PathBuf,
}

impl BoqExporter<SqliteRecordSource> {
    /// 加载导出配置并打开策略库
    pub fn from_config_file<T: AsRef<Path>>(path: T) -> ExportResult<Self> {
        let config = ExportConfig::load(path)?;
        let source = SqliteRecordSource::open(&config)?;
        Ok(Self::new(source, config.export_file))
    }
}

impl<S: PolicyRecordSource> BoqExporter<S> {
    pub fn new(source: S, target: impl Into<PathBuf>) -> Self {
        Self {
            source,
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// 执行导出
    ///
    /// # 返回
    /// - Ok(usize): 写出的数据行数
    /// - Err(DuplicateRecord): 源数据存在重复
    #[instrument(skip(self), fields(target = %self.target.display()))]
    pub fn execute(&self) -> ExportResult<usize> {
        if self.source.has_duplicate_records()? {
            return Err(ExportError::DuplicateRecord(
                "AssetPolicyVAR 中存在重复记录".to_string(),
            ));
        }

        info!("读取 BOQ 记录...");
        let table = self.source.fetch_export_table()?;

        info!(rows = table.rows.len(), "导出为 CSV...");
        write_csv(&self.target, &table.headers, &table.rows)?;

        info!(file = %self.target.display(), "导出完成");
        Ok(table.rows.len())
    }
}

fn write_csv(path: &Path, headers: &[String], rows: &[Vec<String>]) -> ExportResult<()> {
    let mut writer = Writer::from_path(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::policy_source::ExportTable;
    use tempfile::TempDir;

    struct StaticSource {
        duplicates: bool,
        table: ExportTable,
    }

    impl PolicyRecordSource for StaticSource {
        fn has_duplicate_records(&self) -> ExportResult<bool> {
            Ok(self.duplicates)
        }

        fn fetch_export_table(&self) -> ExportResult<ExportTable> {
            Ok(self.table.clone())
        }
    }

    fn table() -> ExportTable {
        ExportTable {
            headers: vec!["boqPath".to_string(), "eul".to_string()],
            rows: vec![
                vec!["BOQ-1".to_string(), "15".to_string()],
                vec!["BOQ-2".to_string(), "".to_string()],
            ],
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("export.csv");
        let exporter = BoqExporter::new(
            StaticSource {
                duplicates: false,
                table: table(),
            },
            &target,
        );

        assert_eq!(exporter.execute().unwrap(), 2);
        let content = std::fs::read_to_string(&target).unwrap();
        assert_eq!(content, "boqPath,eul\nBOQ-1,15\nBOQ-2,\n");
    }

    #[test]
    fn test_duplicates_abort_export() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("export.csv");
        let exporter = BoqExporter::new(
            StaticSource {
                duplicates: true,
                table: table(),
            },
            &target,
        );

        assert!(matches!(exporter.execute(), Err(ExportError::DuplicateRecord(_))));
        assert!(!target.exists());
    }
}
