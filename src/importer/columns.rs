// ==========================================
// 跨境电商订单管理系统 - 平台列名映射表
// ==========================================
// 职责: 规范字段 → 各平台原始列名别名表 (按优先级排序)
// 红线: 纯不可变配置,以常量表示,禁止运行时修改
// ==========================================
// 说明: 别名列表为空表示该平台导出文件不含此字段,
//       归一化时该字段按缺失处理
// ==========================================

use crate::domain::types::Platform;

/// 单个规范字段的候选列名 (按解析优先级排序)
pub type Aliases = &'static [&'static str];

// ==========================================
// ColumnSchema - 平台列名映射表
// ==========================================
#[derive(Debug)]
pub struct ColumnSchema {
    // ===== 订单标识 =====
    pub order_id: Aliases,
    pub sales_record_number: Aliases,

    // ===== 商品行 =====
    pub product_name: Aliases,
    pub product_variation: Aliases,
    pub product_sku: Aliases,
    pub order_item_id: Aliases,
    pub quantity_purchased: Aliases,
    pub quantity_shipped: Aliases,
    pub quantity_to_ship: Aliases,

    // ===== 收件人 =====
    pub recipient_name: Aliases,
    pub recipient_phone: Aliases,
    pub recipient_email: Aliases,

    // ===== 收货地址 =====
    pub address_line1: Aliases,
    pub address_line2: Aliases,
    pub address_line3: Aliases,
    pub address_city: Aliases,
    pub address_state: Aliases,
    pub address_zip: Aliases,
    pub address_country: Aliases,

    // ===== 运单 =====
    pub tracking_number: Aliases,
    pub carrier: Aliases,
    pub service_type: Aliases,

    // ===== 金额 =====
    pub base_price: Aliases,
    pub total_price: Aliases,
    pub transaction_id: Aliases,

    // ===== 元数据 =====
    pub purchase_date: Aliases,
    pub latest_shipping_time: Aliases,
}

impl ColumnSchema {
    /// 展平全部别名 (用于表头模糊检测的分母集合)
    pub fn flatten(&self) -> Vec<&'static str> {
        [
            self.order_id,
            self.sales_record_number,
            self.product_name,
            self.product_variation,
            self.product_sku,
            self.order_item_id,
            self.quantity_purchased,
            self.quantity_shipped,
            self.quantity_to_ship,
            self.recipient_name,
            self.recipient_phone,
            self.recipient_email,
            self.address_line1,
            self.address_line2,
            self.address_line3,
            self.address_city,
            self.address_state,
            self.address_zip,
            self.address_country,
            self.tracking_number,
            self.carrier,
            self.service_type,
            self.base_price,
            self.total_price,
            self.transaction_id,
            self.purchase_date,
            self.latest_shipping_time,
        ]
        .iter()
        .flat_map(|aliases| aliases.iter().copied())
        .collect()
    }
}

// ==========================================
// TEMU_COLUMNS - Temu 导出列名
// ==========================================
pub const TEMU_COLUMNS: ColumnSchema = ColumnSchema {
    order_id: &["order id"],
    sales_record_number: &[],
    product_name: &["product name", "product name by customer order"],
    product_variation: &["variation"],
    product_sku: &["sku id", "contribution sku"],
    order_item_id: &["Order item ID"],
    quantity_purchased: &["quantity purchased"],
    quantity_shipped: &["quantity shipped"],
    quantity_to_ship: &["quantity to ship"],
    recipient_name: &["recipient name"],
    recipient_phone: &["recipient phone number"],
    recipient_email: &["virtual email"],
    address_line1: &["ship address 1"],
    address_line2: &["ship address 2"],
    address_line3: &["ship address 3"],
    address_city: &["ship city"],
    address_state: &["ship state"],
    address_zip: &["ship postal code (Must be shipped to the following zip code.)"],
    address_country: &["ship country"],
    tracking_number: &["tracking number"],
    carrier: &["carrier"],
    service_type: &[],
    base_price: &["activity goods base price"],
    total_price: &["base price total"],
    transaction_id: &[],
    purchase_date: &["purchase date"],
    latest_shipping_time: &[],
};

// ==========================================
// EBAY_COLUMNS - eBay 导出列名
// ==========================================
pub const EBAY_COLUMNS: ColumnSchema = ColumnSchema {
    order_id: &["Order Number"],
    sales_record_number: &["Sales Record Number"],
    product_name: &["Item Title"],
    product_variation: &["Variation Details"],
    product_sku: &["Item Number"],
    order_item_id: &[],
    quantity_purchased: &["Quantity"],
    quantity_shipped: &[],
    quantity_to_ship: &[],
    recipient_name: &["Ship To Name"],
    recipient_phone: &["Ship To Phone"],
    recipient_email: &["Buyer Email"],
    address_line1: &["Ship To Address 1"],
    address_line2: &["Ship To Address 2"],
    address_line3: &[],
    address_city: &["Ship To City"],
    address_state: &["Ship To State"],
    address_zip: &["Ship To Zip"],
    address_country: &["Ship To Country"],
    tracking_number: &["Tracking Number"],
    carrier: &[],
    service_type: &["Shipping Service"],
    base_price: &["Sold For"],
    total_price: &["Total Price"],
    transaction_id: &["Transaction ID"],
    purchase_date: &["Sale Date"],
    latest_shipping_time: &[],
};

// ==========================================
// AMAZON_COLUMNS - Amazon 导出列名
// ==========================================
// Amazon 订单报告不含变体与运单列
pub const AMAZON_COLUMNS: ColumnSchema = ColumnSchema {
    order_id: &["order-id"],
    sales_record_number: &[],
    product_name: &["product-name"],
    product_variation: &[],
    product_sku: &["sku"],
    order_item_id: &["order-item-id"],
    quantity_purchased: &["quantity-purchased"],
    quantity_shipped: &["quantity-shipped"],
    quantity_to_ship: &["quantity-to-ship"],
    recipient_name: &["recipient-name"],
    recipient_phone: &["buyer-phone-number"],
    recipient_email: &["buyer-email"],
    address_line1: &["ship-address-1"],
    address_line2: &["ship-address-2"],
    address_line3: &["ship-address-3"],
    address_city: &["ship-city"],
    address_state: &["ship-state"],
    address_zip: &["ship-postal-code"],
    address_country: &["ship-country"],
    tracking_number: &[],
    carrier: &[],
    service_type: &["ship-service-level"],
    base_price: &[],
    total_price: &[],
    transaction_id: &[],
    purchase_date: &["purchase-date"],
    latest_shipping_time: &["promise-date"],
};

/// 按平台取列名映射表 (Unknown 无映射表)
pub fn schema_for(platform: Platform) -> Option<&'static ColumnSchema> {
    match platform {
        Platform::Temu => Some(&TEMU_COLUMNS),
        Platform::Ebay => Some(&EBAY_COLUMNS),
        Platform::Amazon => Some(&AMAZON_COLUMNS),
        Platform::Unknown => None,
    }
}
