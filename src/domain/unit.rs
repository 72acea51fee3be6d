// ==========================================
// BOQ 策略模板迁移工具 - 分类模板单元
// ==========================================
// 职责: 每条源记录产出的原子单元，也是批量提交的最小单位
// ==========================================

use crate::domain::classification::ClassificationNode;
use crate::domain::template::Template;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTemplateUnit {
    pub classifications: Vec<ClassificationNode>,
    pub template: Template,
}

impl ClassificationTemplateUnit {
    pub fn new(classifications: Vec<ClassificationNode>, template: Template) -> Self {
        Self {
            classifications,
            template,
        }
    }
}
