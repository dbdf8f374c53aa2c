// ==========================================
// 跨境电商订单管理系统 - 订单领域模型
// ==========================================
// 职责: 定义归一化订单实体与导入中间结构
// 红线: OrderFragment 只产出一次,消费方为合并器,不可回写
// ==========================================

use crate::domain::types::{OrderStatus, Platform};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductLine - 订单商品行
// ==========================================
// 一行源数据对应一条商品行,合并后按出现顺序排列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLine {
    pub name: String,
    pub variation: Option<String>,
    pub sku: String,
    pub quantity_purchased: f64,

    // ===== 平台扩展字段 =====
    pub order_item_id: Option<String>,   // Amazon/Temu 行项目标识
    pub quantity_shipped: Option<f64>,   // Amazon/Temu 已发数量
    pub quantity_to_ship: Option<f64>,   // Amazon/Temu 待发数量
}

// ==========================================
// Recipient - 收件人
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub phone: String,
    pub email: String,
}

// ==========================================
// ShippingAddress - 收货地址
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

// ==========================================
// ShippingLabel - 运单面单信息
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingLabel {
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub service_type: Option<String>,
    pub cost: Option<f64>,
}

// ==========================================
// ShippingPackage - 发货包裹
// ==========================================
// 同一订单内按非空运单号去重 (首次出现者保留)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingPackage {
    pub label: ShippingLabel,
    /// 分配到该包裹的商品 (sku, quantity);导入后通常为空,
    /// 由配货流程显式写入并经 allocation 校验
    pub products: Vec<PackageProduct>,
}

/// 包裹内单个 SKU 的分配数量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageProduct {
    pub sku: String,
    pub quantity: f64,
}

// ==========================================
// FinancialSummary - 订单金额信息
// ==========================================
// 数值字段坐标: 解析失败/缺失一律回退 0 (有意的宽松策略)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub base_price: f64,
    pub total_price: f64,
    pub transaction_id: Option<String>, // eBay 交易号
}

// ==========================================
// OrderMetadata - 订单元数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMetadata {
    pub platform: Platform,
    pub purchase_date: DateTime<Utc>,
}

// ==========================================
// ShippingInfo - 发货信息聚合
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub address: ShippingAddress,
    pub packages: Vec<ShippingPackage>,
    pub latest_shipping_time: Option<DateTime<Utc>>,
}

// ==========================================
// CanonicalOrder - 归一化订单
// ==========================================
// 用途: 合并器产出的最终订单记录,文件合并完成后视为不可变
// 约束: order_id 在单文件合并范围内唯一;跨文件不合并
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalOrder {
    // ===== 标识 =====
    pub order_id: String,
    /// 批次内首次出现顺序 (起点由调用方传入,跨文件续接)
    pub order_index: usize,
    /// 外部可见顺序号 = reference_start + order_index;未提供起点则缺省
    pub order_reference_number: Option<String>,
    pub order_status: OrderStatus,

    // ===== 内容 =====
    pub products: Vec<ProductLine>,
    pub recipient: Recipient,
    pub shipping: ShippingInfo,
    pub financial: FinancialSummary,
    pub metadata: OrderMetadata,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CanonicalOrder {
    /// 订单内指定 SKU 的购买总量 (跨商品行求和)
    pub fn purchased_quantity(&self, sku: &str) -> f64 {
        self.products
            .iter()
            .filter(|p| p.sku == sku)
            .map(|p| p.quantity_purchased)
            .sum()
    }
}

// ==========================================
// PackageFragment - 单行携带的包裹线索
// ==========================================
// 仅在运单号非空时产生,合并时按运单号去重
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageFragment {
    pub tracking_number: String,
    pub carrier: Option<String>,
    pub service_type: Option<String>,
}

// ==========================================
// OrderFragment - 归一化行片段
// ==========================================
// 用途: 导入管道中间产物 (原始行 → 归一化 → 此结构 → 合并器)
// 生命周期: 仅在单文件导入流程内,不落库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFragment {
    pub order_id: String,
    pub product: ProductLine,
    pub recipient: Recipient,
    pub address: ShippingAddress,
    pub package: Option<PackageFragment>,
    pub financial: FinancialSummary,
    pub purchase_date: DateTime<Utc>,
    pub latest_shipping_time: Option<DateTime<Utc>>,
    pub platform: Platform,
}
