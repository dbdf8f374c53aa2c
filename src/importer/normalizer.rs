// ==========================================
// 跨境电商订单管理系统 - 行归一化器
// ==========================================
// 职责: 单行原始数据 → 订单片段 (一条商品行 + 至多一个包裹线索)
// 红线: 归一化永不抛错;坏数值/坏日期静默回退默认值
//       (宽松策略为有意取舍: 宁可尽力导入,不因单个坏单元格拒绝整个文件)
// ==========================================

use crate::domain::order::{
    FinancialSummary, OrderFragment, PackageFragment, ProductLine, Recipient, ShippingAddress,
};
use crate::domain::types::Platform;
use crate::importer::columns::{Aliases, ColumnSchema};
use crate::importer::file_parser::RawRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// ==========================================
// 字段解析
// ==========================================

/// 按别名优先级取首个非空值 (去首尾空白后判空)
///
/// 全部别名均缺失/为空 → None,由调用方决定默认值
fn resolve<'a>(row: &'a RawRow, aliases: Aliases) -> Option<&'a str> {
    for alias in aliases {
        if let Some(value) = row.get(*alias) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }
    None
}

/// 可选字符串坐标: 空 → 缺失
fn to_optional(value: Option<&str>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// 数值坐标: 解析失败/缺失 → 0
fn to_number(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0)
}

/// 日期坐标: 解析失败/缺失 → 当前处理时间
fn to_date(value: Option<&str>) -> DateTime<Utc> {
    value.and_then(parse_date).unwrap_or_else(Utc::now)
}

/// 依次尝试各平台常见日期格式
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    // RFC3339 (Amazon purchase-date)
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ndt.and_utc());
        }
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%b-%d-%y", "%b %d, %Y"];
    for fmt in DATE_FORMATS {
        if let Ok(nd) = NaiveDate::parse_from_str(value, fmt) {
            return nd.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
        }
    }

    None
}

// ==========================================
// normalize_row - 单行归一化
// ==========================================
// 每一行原始数据都产出片段;零数量或关键字段为空的行同样产出,
// 必填校验属于持久化协作方职责,不在此处拦截
pub fn normalize_row(platform: Platform, schema: &ColumnSchema, row: &RawRow) -> OrderFragment {
    let product = ProductLine {
        name: resolve(row, schema.product_name).unwrap_or_default().to_string(),
        variation: to_optional(resolve(row, schema.product_variation)),
        sku: resolve(row, schema.product_sku).unwrap_or_default().to_string(),
        quantity_purchased: to_number(resolve(row, schema.quantity_purchased)),
        order_item_id: to_optional(resolve(row, schema.order_item_id)),
        quantity_shipped: resolve(row, schema.quantity_shipped).map(|v| to_number(Some(v))),
        quantity_to_ship: resolve(row, schema.quantity_to_ship).map(|v| to_number(Some(v))),
    };

    let recipient = Recipient {
        name: resolve(row, schema.recipient_name).unwrap_or_default().to_string(),
        phone: resolve(row, schema.recipient_phone).unwrap_or_default().to_string(),
        email: resolve(row, schema.recipient_email).unwrap_or_default().to_string(),
    };

    let address = ShippingAddress {
        line1: resolve(row, schema.address_line1).unwrap_or_default().to_string(),
        line2: to_optional(resolve(row, schema.address_line2)),
        line3: to_optional(resolve(row, schema.address_line3)),
        city: resolve(row, schema.address_city).unwrap_or_default().to_string(),
        state: resolve(row, schema.address_state).unwrap_or_default().to_string(),
        zip: resolve(row, schema.address_zip).unwrap_or_default().to_string(),
        country: resolve(row, schema.address_country).unwrap_or_default().to_string(),
    };

    // 仅运单号非空时产生包裹线索 (Amazon 导出不含运单列,恒为 None)
    let package = resolve(row, schema.tracking_number).map(|tracking| PackageFragment {
        tracking_number: tracking.to_string(),
        carrier: to_optional(resolve(row, schema.carrier)),
        service_type: to_optional(resolve(row, schema.service_type)),
    });

    let financial = FinancialSummary {
        base_price: to_number(resolve(row, schema.base_price)),
        total_price: to_number(resolve(row, schema.total_price)),
        transaction_id: to_optional(resolve(row, schema.transaction_id)),
    };

    OrderFragment {
        order_id: resolve(row, schema.order_id).unwrap_or_default().to_string(),
        product,
        recipient,
        address,
        package,
        financial,
        purchase_date: to_date(resolve(row, schema.purchase_date)),
        latest_shipping_time: resolve(row, schema.latest_shipping_time)
            .and_then(parse_date),
        platform,
    }
}
