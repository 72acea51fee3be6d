// ==========================================
// BOQ 策略模板迁移工具 - 批量累加器
// ==========================================
// 职责: 收集分类模板单元，达到批量大小时由编排器取出提交
// 红线: 单写单读，仅在编排器线程内使用
// ==========================================

use crate::domain::ClassificationTemplateUnit;

#[derive(Debug)]
pub struct BatchAccumulator {
    capacity: usize,
    units: Vec<ClassificationTemplateUnit>,
}

impl BatchAccumulator {
    /// 创建累加器（capacity 最小为 1）
    ///
    /// capacity 仅作提交阈值，不预分配
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            units: Vec::new(),
        }
    }

    pub fn add(&mut self, unit: ClassificationTemplateUnit) {
        self.units.push(unit);
    }

    pub fn is_full(&self) -> bool {
        self.units.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 取出当前批次并清空
    pub fn drain(&mut self) -> Vec<ClassificationTemplateUnit> {
        std::mem::take(&mut self.units)
    }
}
