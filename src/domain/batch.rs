// ==========================================
// 跨境电商订单管理系统 - 批次领域模型
// ==========================================
// 职责: 定义上传批次实体与查询投影
// 约束: 批次名在全部订单合并完成后计算一次,之后不变
// ==========================================

use crate::domain::types::Platform;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Batch - 上传批次
// ==========================================
// 一次上传操作 (一个或多个文件) 产出一个批次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    /// 由订单顺序号区间派生的人类可读名称 (如 "10-15")
    pub name: String,
    /// 批次内涉及的平台 (去重,按出现顺序)
    pub platforms: Vec<Platform>,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(name: String, platforms: Vec<Platform>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            platforms,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// BatchSummary - 批次列表投影
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub batch_name: String,
    pub created_at: DateTime<Utc>,
    pub order_count: i64,
    pub platforms: Vec<Platform>,
}

// ==========================================
// BatchFilter - 批次查询条件
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BatchFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub platform: Option<Platform>,
}
