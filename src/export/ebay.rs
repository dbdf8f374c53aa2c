// ==========================================
// 跨境电商订单管理系统 - eBay 文档导出
// ==========================================
// 职责: 发货确认单 (回传 eBay) 与记账单 (财务对账)
// 约束: 无包裹的订单跳过;零数量分配行跳过
// ==========================================

use crate::domain::order::CanonicalOrder;
use crate::export::{into_bytes, Exporter, ExportResult};
use chrono::Datelike;
use csv::WriterBuilder;

/// 金额取半舍入 (0.5 为步长,运费汇总口径)
fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

// ==========================================
// EbayShippingConfirmationExporter - 发货确认单
// ==========================================
// eBay 批量上传模板要求 #INFO 说明行在表头之前
pub struct EbayShippingConfirmationExporter;

impl Exporter for EbayShippingConfirmationExporter {
    fn export(&self, orders: &[CanonicalOrder]) -> ExportResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(["#INFO"])?;
        writer.write_record([
            "Shipping Status",
            "Order Number",
            "Item Number",
            "Item Title",
            "Custom Label",
            "Transaction ID",
            "Shipping Carrier Used",
            "Tracking Number",
        ])?;

        for order in orders {
            for package in &order.shipping.packages {
                let tracking = package.label.tracking_number.as_deref().unwrap_or("");
                let carrier = package.label.carrier.as_deref().unwrap_or("");

                for allocation in &package.products {
                    if allocation.quantity <= 0.0 {
                        continue;
                    }
                    let product = order.products.iter().find(|p| p.sku == allocation.sku);

                    writer.write_record([
                        "Shipped",
                        order.order_id.as_str(),
                        allocation.sku.as_str(),
                        product.map(|p| p.name.as_str()).unwrap_or(""),
                        "",
                        order.financial.transaction_id.as_deref().unwrap_or(""),
                        carrier,
                        tracking,
                    ])?;
                }
            }
        }

        into_bytes(writer)
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}

// ==========================================
// EbayAccountingExporter - 记账单
// ==========================================
// 每条商品行一条记录;整单运费只计入首条记录
pub struct EbayAccountingExporter;

impl Exporter for EbayAccountingExporter {
    fn export(&self, orders: &[CanonicalOrder]) -> ExportResult<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer.write_record([
            "comments",
            "store",
            "date",
            "platform id",
            "reference id",
            "description",
            "quantity",
            "base price",
            "shipping",
            "refund",
            "total",
            "sku",
        ])?;

        for order in orders {
            let total_shipping: f64 = order
                .shipping
                .packages
                .iter()
                .map(|pkg| round_to_half(pkg.label.cost.unwrap_or(0.0)))
                .sum();

            let date = order.metadata.purchase_date;
            let date_str = format!("{}/{}/{}", date.month(), date.day(), date.year());

            for (idx, product) in order.products.iter().enumerate() {
                let description = format!(
                    "[Ebay] {} - {}",
                    product.name,
                    product.variation.as_deref().unwrap_or("")
                );
                let shipping = if idx == 0 {
                    format!("{total_shipping:.2}")
                } else {
                    String::new()
                };

                writer.write_record([
                    "",
                    "ebay",
                    date_str.as_str(),
                    order.order_id.as_str(),
                    order.order_reference_number.as_deref().unwrap_or(""),
                    description.as_str(),
                    &product.quantity_purchased.to_string(),
                    &format!("{:.2}", order.financial.base_price),
                    shipping.as_str(),
                    "",
                    &format!("{:.2}", order.financial.total_price),
                    product.sku.as_str(),
                ])?;
            }
        }

        into_bytes(writer)
    }

    fn file_extension(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{
        FinancialSummary, OrderMetadata, PackageProduct, ProductLine, Recipient, ShippingAddress,
        ShippingInfo, ShippingLabel, ShippingPackage,
    };
    use crate::domain::types::{OrderStatus, Platform};
    use chrono::Utc;

    fn order_with_package() -> CanonicalOrder {
        CanonicalOrder {
            order_id: "ORD-1".to_string(),
            order_index: 0,
            order_reference_number: Some("100".to_string()),
            order_status: OrderStatus::Unshipped,
            products: vec![ProductLine {
                name: "Widget".to_string(),
                variation: Some("Red".to_string()),
                sku: "SKU-1".to_string(),
                quantity_purchased: 2.0,
                order_item_id: None,
                quantity_shipped: None,
                quantity_to_ship: None,
            }],
            recipient: Recipient {
                name: "Alice".to_string(),
                phone: String::new(),
                email: String::new(),
            },
            shipping: ShippingInfo {
                address: ShippingAddress {
                    line1: "1 Main St".to_string(),
                    line2: None,
                    line3: None,
                    city: "Town".to_string(),
                    state: "CA".to_string(),
                    zip: "90210".to_string(),
                    country: "US".to_string(),
                },
                packages: vec![ShippingPackage {
                    label: ShippingLabel {
                        tracking_number: Some("TRK-1".to_string()),
                        carrier: Some("USPS".to_string()),
                        service_type: None,
                        cost: Some(4.3),
                    },
                    products: vec![PackageProduct {
                        sku: "SKU-1".to_string(),
                        quantity: 2.0,
                    }],
                }],
                latest_shipping_time: None,
            },
            financial: FinancialSummary {
                base_price: 9.99,
                total_price: 12.99,
                transaction_id: Some("TX-1".to_string()),
            },
            metadata: OrderMetadata {
                platform: Platform::Ebay,
                purchase_date: Utc::now(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_to_half() {
        assert_eq!(round_to_half(4.3), 4.5);
        assert_eq!(round_to_half(4.1), 4.0);
        assert_eq!(round_to_half(0.0), 0.0);
    }

    #[test]
    fn test_shipping_confirmation_layout() {
        let bytes = EbayShippingConfirmationExporter
            .export(&[order_with_package()])
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#INFO");
        assert!(lines[1].starts_with("Shipping Status,Order Number"));
        assert!(lines[2].contains("TRK-1"));
        assert!(lines[2].contains("TX-1"));
    }

    #[test]
    fn test_shipping_confirmation_skips_orders_without_packages() {
        let mut order = order_with_package();
        order.shipping.packages.clear();
        let bytes = EbayShippingConfirmationExporter.export(&[order]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // 只有 #INFO 与表头两行
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_accounting_row_per_product() {
        let bytes = EbayAccountingExporter
            .export(&[order_with_package()])
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("[Ebay] Widget - Red"));
        assert!(lines[1].contains("4.50")); // 运费取半舍入
    }
}
