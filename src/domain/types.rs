// ==========================================
// 跨境电商订单管理系统 - 基础类型定义
// ==========================================
// 职责: 定义平台、订单状态等封闭枚举
// 红线: 平台集合为封闭枚举,新增平台必须经过编译器检查
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Platform - 来源平台
// ==========================================
// 每个上传文件只归属一个平台,检测一次后全程不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    /// Temu 卖家中心导出 (xlsx)
    Temu,
    /// eBay 销售记录导出 (带前导说明与结尾汇总的 CSV)
    Ebay,
    /// Amazon 订单报告导出 (制表符分隔)
    Amazon,
    /// 无法识别的平台 (整个文件硬失败,不做部分解析)
    Unknown,
}

impl Platform {
    /// 平台关键字 (用于提示词匹配与落库)
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Temu => "temu",
            Platform::Ebay => "ebay",
            Platform::Amazon => "amazon",
            Platform::Unknown => "unknown",
        }
    }

    /// 已知平台全集 (检测遍历顺序固定)
    pub fn known() -> [Platform; 3] {
        [Platform::Temu, Platform::Ebay, Platform::Amazon]
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Platform::Unknown)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "temu" => Platform::Temu,
            "ebay" => Platform::Ebay,
            "amazon" => Platform::Amazon,
            _ => Platform::Unknown,
        }
    }
}

// ==========================================
// OrderStatus - 订单履约状态
// ==========================================
// 导入后统一为 UNSHIPPED,发货确认流程之后更新
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Unshipped,
    Shipped,
    Cancelled,
}

// ==========================================
// DocumentType - 导出文档类型
// ==========================================
// 与平台共同构成导出器工厂的二维选择键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// 发货确认单 (回传平台)
    ShippingConfirmation,
    /// 记账单 (财务对账)
    Accounting,
}

impl DocumentType {
    pub fn key(&self) -> &'static str {
        match self {
            DocumentType::ShippingConfirmation => "shipping-confirmation",
            DocumentType::Accounting => "accounting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!(Platform::from("TEMU"), Platform::Temu);
        assert_eq!(Platform::from("ebay"), Platform::Ebay);
        assert_eq!(Platform::from("walmart"), Platform::Unknown);
    }

    #[test]
    fn test_platform_serde_roundtrip() {
        let json = serde_json::to_string(&Platform::Amazon).unwrap();
        assert_eq!(json, "\"AMAZON\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::Amazon);
    }
}
