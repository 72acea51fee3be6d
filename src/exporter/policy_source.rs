// ==========================================
// BOQ 策略模板迁移工具 - 策略记录源 Trait
// ==========================================
// 职责: 导出方向的关系型数据源接口（驱动细节隐藏在实现之后）
// 实现者: SqliteRecordSource
// ==========================================

use crate::exporter::error::ExportResult;

/// 导出表（表头 + 行，NULL 以空串表示）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait PolicyRecordSource {
    /// 源数据中是否存在重复策略记录
    fn has_duplicate_records(&self) -> ExportResult<bool>;

    /// 读取待导出的全部记录
    fn fetch_export_table(&self) -> ExportResult<ExportTable>;
}
