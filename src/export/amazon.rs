// ==========================================
// 跨境电商订单管理系统 - Amazon 文档导出
// ==========================================
// 职责: 发货确认单 (上传 Amazon 卖家后台)
// 格式: Tab 分隔文本,列名遵循 Amazon 批量发货模板
// ==========================================

use crate::domain::order::CanonicalOrder;
use crate::export::{into_bytes, Exporter, ExportResult};
use chrono::{Datelike, Utc};
use csv::WriterBuilder;

// ==========================================
// AmazonShippingConfirmationExporter - 发货确认单
// ==========================================
// 行粒度: 包裹 × 包裹内商品;零数量分配行跳过
pub struct AmazonShippingConfirmationExporter;

impl Exporter for AmazonShippingConfirmationExporter {
    fn export(&self, orders: &[CanonicalOrder]) -> ExportResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(Vec::new());

        writer.write_record([
            "order-id",
            "order-item-id",
            "quantity",
            "ship-date",
            "carrier-code",
            "carrier-name",
            "tracking-number",
            "ship-method",
            "transparency_code",
            "ship_from_address_name",
            "ship_from_address_line1",
            "ship_from_address_line2",
            "ship_from_address_line3",
            "ship_from_address_city",
            "ship_from_address_county",
            "ship_from_address_state_or_region",
            "ship_from_address_postalcode",
            "ship_from_address_countrycode",
        ])?;

        let now = Utc::now();
        let ship_date = format!("{}/{}/{}", now.month(), now.day(), now.year());

        for order in orders {
            for package in &order.shipping.packages {
                let tracking = package.label.tracking_number.as_deref().unwrap_or("");
                let carrier = package.label.carrier.as_deref().unwrap_or("");
                let service = package.label.service_type.as_deref().unwrap_or("");

                for allocation in &package.products {
                    if allocation.quantity <= 0.0 {
                        continue;
                    }
                    let order_item_id = order
                        .products
                        .iter()
                        .find(|p| p.sku == allocation.sku)
                        .and_then(|p| p.order_item_id.as_deref())
                        .unwrap_or("");

                    writer.write_record([
                        order.order_id.as_str(),
                        order_item_id,
                        &allocation.quantity.to_string(),
                        ship_date.as_str(),
                        carrier,
                        carrier,
                        tracking,
                        service,
                        "",
                        "",
                        "",
                        "",
                        "",
                        "",
                        "",
                        "",
                        "",
                        "",
                    ])?;
                }
            }
        }

        into_bytes(writer)
    }

    fn file_extension(&self) -> &'static str {
        "tsv"
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

    fn amazon_order() -> CanonicalOrder {
        CanonicalOrder {
            order_id: "114-0000001".to_string(),
            order_index: 0,
            order_reference_number: None,
            order_status: OrderStatus::Unshipped,
            products: vec![ProductLine {
                name: "Gadget".to_string(),
                variation: None,
                sku: "SKU-A".to_string(),
                quantity_purchased: 1.0,
                order_item_id: Some("ITEM-9".to_string()),
                quantity_shipped: Some(0.0),
                quantity_to_ship: Some(1.0),
            }],
            recipient: Recipient {
                name: "Bob".to_string(),
                phone: String::new(),
                email: String::new(),
            },
            shipping: ShippingInfo {
                address: ShippingAddress {
                    line1: "2 Oak Ave".to_string(),
                    line2: None,
                    line3: None,
                    city: "City".to_string(),
                    state: "NY".to_string(),
                    zip: "10001".to_string(),
                    country: "US".to_string(),
                },
                packages: vec![ShippingPackage {
                    label: ShippingLabel {
                        tracking_number: Some("1Z999".to_string()),
                        carrier: Some("UPS".to_string()),
                        service_type: Some("Ground".to_string()),
                        cost: None,
                    },
                    products: vec![
                        PackageProduct {
                            sku: "SKU-A".to_string(),
                            quantity: 1.0,
                        },
                        PackageProduct {
                            sku: "SKU-A".to_string(),
                            quantity: 0.0,
                        },
                    ],
                }],
                latest_shipping_time: None,
            },
            financial: FinancialSummary::default(),
            metadata: OrderMetadata {
                platform: Platform::Amazon,
                purchase_date: Utc::now(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_tab_delimited_with_item_id() {
        let bytes = AmazonShippingConfirmationExporter
            .export(&[amazon_order()])
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("order-id\torder-item-id\tquantity"));
        // 零数量分配行被跳过,只剩一条数据行
        assert_eq!(lines.len(), 2);
        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields[0], "114-0000001");
        assert_eq!(fields[1], "ITEM-9");
        assert_eq!(fields[2], "1");
        assert_eq!(fields[6], "1Z999");
    }
}
