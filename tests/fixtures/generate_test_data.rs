// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成 BOQ 导入测试数据集 CSV 文件
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use chrono::{Datelike, Local};
use csv::Writer;
use std::error::Error;
use std::fs::{self, File};

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// CSV 表头（与旧系统 PolicyVARExportForBOQ 导出列一致）
const CSV_HEADER: &[&str] = &[
    "financialYear",
    "boqPath",
    "componentType",
    "componentType_ID",
    "descriptorType",
    "descriptorType_ID",
    "descriptorClass",
    "descriptorClass_ID",
    "descriptorSize",
    "descriptorSize_ID",
    "eul",
    "extentUnit",
    "unitRate",
    "IncludeDescriptorSize",
];

const COMPONENT_TYPES: &[&str] = &["Pump", "Valve", "Pipe", "Reservoir", "Meter"];
const DESCRIPTOR_TYPES: &[&str] = &["Motor", "Gate", "Steel", "Concrete", "Bulk"];
const DESCRIPTOR_CLASSES: &[&str] = &["Electric", "Manual", "Lined", ""];
const DESCRIPTOR_SIZES: &[&str] = &["Small", "Medium", "Large", "250", ""];
const EXTENT_UNITS: &[&str] = &["m", "m2", "m3", "each"];

// BOQ 策略记录
#[derive(Clone)]
struct BoqRecord {
    financial_year: String,
    boq_path: String,
    component_type: String,
    component_type_id: String,
    descriptor_type: String,
    descriptor_type_id: String,
    descriptor_class: String,
    descriptor_class_id: String,
    descriptor_size: String,
    descriptor_size_id: String,
    eul: String,
    extent_unit: String,
    unit_rate: String,
    include_descriptor_size: String,
}

impl BoqRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.financial_year.clone(),
            self.boq_path.clone(),
            self.component_type.clone(),
            self.component_type_id.clone(),
            self.descriptor_type.clone(),
            self.descriptor_type_id.clone(),
            self.descriptor_class.clone(),
            self.descriptor_class_id.clone(),
            self.descriptor_size.clone(),
            self.descriptor_size_id.clone(),
            self.eul.clone(),
            self.extent_unit.clone(),
            self.unit_rate.clone(),
            self.include_descriptor_size.clone(),
        ]
    }
}

// 生成正常 BOQ 记录（boqPath 按 index 唯一）
fn generate_normal_record(index: usize) -> BoqRecord {
    let year = Local::now().year().to_string();
    let ct_id = format!("CT{:02}", index % COMPONENT_TYPES.len() + 1);
    let dt_id = format!("DT{:02}", index % DESCRIPTOR_TYPES.len() + 1);
    let dc_id = format!("DC{:02}", index % DESCRIPTOR_CLASSES.len() + 1);
    let ds_id = format!("DS{:05}", index + 1);

    BoqRecord {
        boq_path: format!("BOQ-{}-{}-{}-{}-{}", year, ct_id, dt_id, dc_id, ds_id),
        financial_year: year,
        component_type: COMPONENT_TYPES[index % COMPONENT_TYPES.len()].to_string(),
        component_type_id: ct_id,
        descriptor_type: DESCRIPTOR_TYPES[index % DESCRIPTOR_TYPES.len()].to_string(),
        descriptor_type_id: dt_id,
        descriptor_class: DESCRIPTOR_CLASSES[index % DESCRIPTOR_CLASSES.len()].to_string(),
        descriptor_class_id: dc_id,
        descriptor_size: DESCRIPTOR_SIZES[index % DESCRIPTOR_SIZES.len()].to_string(),
        descriptor_size_id: ds_id,
        eul: format!("{}", 10 + (index % 40)),
        extent_unit: EXTENT_UNITS[index % EXTENT_UNITS.len()].to_string(),
        unit_rate: format!("{:.2}", 150.0 + (index % 300) as f64 * 12.5),
        include_descriptor_size: ["true", "false"][index % 2].to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成 BOQ 测试数据集...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 正常数据 (100条)
    write_dataset("01_normal_data.csv", (0..100).map(generate_normal_record))?;

    // 2. 大数据集 (1000条)
    write_dataset(
        "02_large_dataset.csv",
        (0..1000).map(|i| generate_normal_record(i + 10000)),
    )?;

    // 3. 描述符为空（节点降级为 NULL / Not Specified）
    write_dataset(
        "03_empty_descriptors.csv",
        (0..12).map(|i| {
            let mut record = generate_normal_record(i + 20000);
            match i % 3 {
                0 => record.descriptor_type.clear(),
                1 => record.descriptor_class.clear(),
                _ => record.descriptor_size.clear(),
            }
            record
        }),
    )?;

    // 4. 第 8 条 boqPath 层级不足（导入在该行终止）
    write_dataset(
        "04_malformed_path.csv",
        (0..10).map(|i| {
            let mut record = generate_normal_record(i + 30000);
            if i == 7 {
                record.boq_path = format!("BOQ-{}-{}", record.financial_year, record.component_type_id);
            }
            record
        }),
    )?;

    // 5. 模板字段为 NULL / 空值（不输出对应字段）
    write_dataset(
        "05_null_field_values.csv",
        (0..10).map(|i| {
            let mut record = generate_normal_record(i + 40000);
            record.eul = "NULL".to_string();
            if i % 2 == 0 {
                record.unit_rate.clear();
            }
            record
        }),
    )?;

    // 6. 只有表头
    write_dataset("06_header_only.csv", std::iter::empty())?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn write_dataset(
    name: &str,
    records: impl Iterator<Item = BoqRecord>,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}", OUTPUT_DIR, name);
    let file = File::create(&path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CSV_HEADER)?;

    let mut count = 0usize;
    for record in records {
        wtr.write_record(&record.to_row())?;
        count += 1;
    }

    wtr.flush()?;
    println!("✓ 生成 {} ({}条)", name, count);
    Ok(())
}
