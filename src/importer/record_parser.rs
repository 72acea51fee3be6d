// ==========================================
// BOQ 策略模板迁移工具 - 记录解析器
// ==========================================
// 职责: 将分隔符文本逐行解码为 SourceRow
// 规则: 首行为表头（列名大小写不敏感），值去除首尾空白
// 特性: 惰性、有限、不可重放（消费底层流）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// HeaderIndex - 表头索引（小写列名 → 列位置）
// ==========================================
#[derive(Debug)]
struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        let mut positions = HashMap::new();
        for (idx, name) in names.enumerate() {
            // 重名列以第一次出现为准
            positions.entry(name.trim().to_lowercase()).or_insert(idx);
        }
        Self { positions }
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.positions.get(&field.to_lowercase()).copied()
    }
}

// ==========================================
// SourceRow - 单行源记录
// ==========================================
#[derive(Debug, Clone)]
pub struct SourceRow {
    header: Arc<HeaderIndex>,
    record: StringRecord,
    line: u64,
    record_number: u64,
}

impl SourceRow {
    /// 按列名取值（大小写不敏感）
    ///
    /// # 返回
    /// - Err(MissingField): 表头中不存在该列
    pub fn get(&self, field: &str) -> ImportResult<&str> {
        self.header
            .position(field)
            .and_then(|idx| self.record.get(idx))
            .ok_or_else(|| ImportError::MissingField {
                line: self.line,
                field: field.to_string(),
            })
    }

    /// 源文件中的物理行号（表头为第 1 行）
    pub fn line(&self) -> u64 {
        self.line
    }

    /// 数据记录序号（从 1 开始，不含表头）
    pub fn record_number(&self) -> u64 {
        self.record_number
    }

    /// 由列名/值对直接构造（不经过文件）
    pub fn from_pairs(line: u64, pairs: &[(&str, &str)]) -> Self {
        let header = HeaderIndex::new(pairs.iter().map(|(name, _)| *name));
        let record = StringRecord::from(
            pairs
                .iter()
                .map(|(_, value)| value.trim())
                .collect::<Vec<_>>(),
        );

        Self {
            header: Arc::new(header),
            record,
            line,
            record_number: line.saturating_sub(1),
        }
    }
}

// ==========================================
// RecordParser - 惰性 CSV 记录迭代器
// ==========================================
pub struct RecordParser<R: Read> {
    reader: csv::Reader<R>,
    header: Arc<HeaderIndex>,
    record_number: u64,
}

impl RecordParser<File> {
    /// 打开导入文件
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ImportError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> RecordParser<R> {
    /// 从任意可读流构造，立即读取并校验表头
    pub fn from_reader(source: R) -> ImportResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(false) // 行列数必须与表头一致
            .from_reader(source);

        let headers = reader.headers()?;
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MalformedInput {
                line: 1,
                message: "缺少表头".to_string(),
            });
        }
        let header = HeaderIndex::new(headers.iter());

        Ok(Self {
            reader,
            header: Arc::new(header),
            record_number: 0,
        })
    }
}

impl<R: Read> Iterator for RecordParser<R> {
    type Item = ImportResult<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(false) => None,
            Ok(true) => {
                self.record_number += 1;
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(self.record_number + 1);

                Some(Ok(SourceRow {
                    header: Arc::clone(&self.header),
                    record,
                    line,
                    record_number: self.record_number,
                }))
            }
            Err(e) => Some(Err(ImportError::from(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_case_insensitive_and_trimmed() {
        let data = "FinancialYear, boqPath ,eul\n 2020 , BOQ-2020-1 ,  15 \n";
        let mut parser = RecordParser::from_reader(data.as_bytes()).unwrap();

        let row = parser.next().unwrap().unwrap();
        assert_eq!(row.get("financialYear").unwrap(), "2020");
        assert_eq!(row.get("BOQPATH").unwrap(), "BOQ-2020-1");
        assert_eq!(row.get("eul").unwrap(), "15");
        assert_eq!(row.line(), 2);
        assert_eq!(row.record_number(), 1);
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_missing_column_lookup() {
        let data = "a,b\n1,2\n";
        let mut parser = RecordParser::from_reader(data.as_bytes()).unwrap();
        let row = parser.next().unwrap().unwrap();

        let err = row.get("c").unwrap_err();
        assert!(matches!(err, ImportError::MissingField { line: 2, ref field } if field == "c"));
    }

    #[test]
    fn test_empty_source_has_no_header() {
        let result = RecordParser::from_reader("".as_bytes());
        assert!(matches!(result, Err(ImportError::MalformedInput { .. })));
    }

    #[test]
    fn test_column_count_mismatch() {
        let data = "a,b,c\n1,2,3\n4,5\n";
        let mut parser = RecordParser::from_reader(data.as_bytes()).unwrap();

        assert!(parser.next().unwrap().is_ok());
        let err = parser.next().unwrap().unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn test_quoted_values_keep_delimiters() {
        let data = "name,boqPath\n\"Pump, Large\",BOQ-1\n";
        let mut parser = RecordParser::from_reader(data.as_bytes()).unwrap();
        let row = parser.next().unwrap().unwrap();
        assert_eq!(row.get("name").unwrap(), "Pump, Large");
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordParser::open("definitely/not/here.csv");
        assert!(matches!(result, Err(ImportError::FileRead { .. })));
    }

    #[test]
    fn test_from_pairs() {
        let row = SourceRow::from_pairs(5, &[("boqPath", " BOQ-1 "), ("eul", "")]);
        assert_eq!(row.get("boqPath").unwrap(), "BOQ-1");
        assert_eq!(row.get("eul").unwrap(), "");
        assert_eq!(row.line(), 5);
    }
}
