// ==========================================
// 跨境电商订单管理系统 - 订单合并器
// ==========================================
// 职责: 将共享 order_id 的片段合并为归一化订单
// 红线: 严格单趟顺序处理;首次出现顺序决定 order_index,
//       顺序正确性是契约的一部分
// ==========================================
// 合并范围以单文件为界: 跨文件的相同 order_id 不合并,
// 这是有意的边界划分,调用方通过 start_index 续接序号
// ==========================================

use crate::domain::order::{
    CanonicalOrder, OrderFragment, OrderMetadata, ShippingInfo, ShippingLabel, ShippingPackage,
};
use crate::domain::types::OrderStatus;
use chrono::Utc;
use std::collections::HashMap;

// ==========================================
// consolidate - 片段合并主入口
// ==========================================
/// 将有序片段序列合并为有序归一化订单序列
///
/// # 参数
/// - fragments: 按文件行顺序排列的片段
/// - start_index: 序号起点 (同批次前序文件已产出的订单数)
/// - reference_start: 外部顺序号起点;提供时
///   order_reference_number = reference_start + order_index
///
/// # 算法
/// 插入序映射 (HashMap 定位 + 追加向量保序),单趟扫描:
/// - 已存在的 order_id: 追加商品行;携带新运单号则追加空包裹,
///   重复运单号直接丢弃 (首次出现者保留)
/// - 新 order_id: 以 start_index + 已见订单数 赋序号并建单
pub fn consolidate(
    fragments: Vec<OrderFragment>,
    start_index: usize,
    reference_start: Option<i64>,
) -> Vec<CanonicalOrder> {
    let mut orders: Vec<CanonicalOrder> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for fragment in fragments {
        match index_of.get(&fragment.order_id) {
            Some(&pos) => {
                let order = &mut orders[pos];
                order.products.push(fragment.product);
                if let Some(pkg) = fragment.package {
                    let duplicate = order.shipping.packages.iter().any(|existing| {
                        existing.label.tracking_number.as_deref()
                            == Some(pkg.tracking_number.as_str())
                    });
                    if !duplicate {
                        order.shipping.packages.push(ShippingPackage {
                            label: ShippingLabel {
                                tracking_number: Some(pkg.tracking_number),
                                carrier: pkg.carrier,
                                service_type: pkg.service_type,
                                cost: None,
                            },
                            products: Vec::new(),
                        });
                    }
                }
            }
            None => {
                let order_index = start_index + orders.len();
                let order_reference_number =
                    reference_start.map(|start| (start + order_index as i64).to_string());

                let packages = fragment
                    .package
                    .map(|pkg| {
                        vec![ShippingPackage {
                            label: ShippingLabel {
                                tracking_number: Some(pkg.tracking_number),
                                carrier: pkg.carrier,
                                service_type: pkg.service_type,
                                cost: None,
                            },
                            products: Vec::new(),
                        }]
                    })
                    .unwrap_or_default();

                let now = Utc::now();
                index_of.insert(fragment.order_id.clone(), orders.len());
                orders.push(CanonicalOrder {
                    order_id: fragment.order_id,
                    order_index,
                    order_reference_number,
                    order_status: OrderStatus::Unshipped,
                    products: vec![fragment.product],
                    recipient: fragment.recipient,
                    shipping: ShippingInfo {
                        address: fragment.address,
                        packages,
                        latest_shipping_time: fragment.latest_shipping_time,
                    },
                    financial: fragment.financial,
                    metadata: OrderMetadata {
                        platform: fragment.platform,
                        purchase_date: fragment.purchase_date,
                    },
                    created_at: now,
                    updated_at: now,
                });
            }
        }
    }

    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{
        FinancialSummary, PackageFragment, ProductLine, Recipient, ShippingAddress,
    };
    use crate::domain::types::Platform;

    fn fragment(order_id: &str, sku: &str, qty: f64, tracking: Option<&str>) -> OrderFragment {
        OrderFragment {
            order_id: order_id.to_string(),
            product: ProductLine {
                name: format!("商品 {sku}"),
                variation: None,
                sku: sku.to_string(),
                quantity_purchased: qty,
                order_item_id: None,
                quantity_shipped: None,
                quantity_to_ship: None,
            },
            recipient: Recipient {
                name: "买家".to_string(),
                phone: String::new(),
                email: String::new(),
            },
            address: ShippingAddress {
                line1: "line1".to_string(),
                line2: None,
                line3: None,
                city: "city".to_string(),
                state: "state".to_string(),
                zip: "00000".to_string(),
                country: "US".to_string(),
            },
            package: tracking.map(|t| PackageFragment {
                tracking_number: t.to_string(),
                carrier: None,
                service_type: None,
            }),
            financial: FinancialSummary::default(),
            purchase_date: Utc::now(),
            latest_shipping_time: None,
            platform: Platform::Ebay,
        }
    }

    #[test]
    fn test_merge_rows_sharing_order_id() {
        let orders = consolidate(
            vec![
                fragment("A", "S1", 2.0, None),
                fragment("A", "S2", 1.0, None),
                fragment("A", "S1", 1.0, None),
            ],
            0,
            None,
        );
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].products.len(), 3);
        assert_eq!(orders[0].purchased_quantity("S1"), 3.0);
        assert_eq!(orders[0].purchased_quantity("S2"), 1.0);
    }

    #[test]
    fn test_order_index_by_first_appearance() {
        let orders = consolidate(
            vec![
                fragment("B", "S1", 1.0, None),
                fragment("A", "S1", 1.0, None),
                fragment("B", "S2", 1.0, None),
                fragment("C", "S1", 1.0, None),
            ],
            5,
            None,
        );
        let got: Vec<(&str, usize)> = orders
            .iter()
            .map(|o| (o.order_id.as_str(), o.order_index))
            .collect();
        assert_eq!(got, vec![("B", 5), ("A", 6), ("C", 7)]);
    }

    #[test]
    fn test_reference_number_derivation() {
        let orders = consolidate(
            vec![fragment("A", "S1", 1.0, None), fragment("B", "S1", 1.0, None)],
            2,
            Some(100),
        );
        assert_eq!(orders[0].order_reference_number.as_deref(), Some("102"));
        assert_eq!(orders[1].order_reference_number.as_deref(), Some("103"));
    }

    #[test]
    fn test_reference_number_unset_without_start() {
        let orders = consolidate(vec![fragment("A", "S1", 1.0, None)], 0, None);
        assert!(orders[0].order_reference_number.is_none());
    }

    #[test]
    fn test_duplicate_tracking_number_kept_once() {
        let orders = consolidate(
            vec![
                fragment("A", "S1", 1.0, Some("TRK-1")),
                fragment("A", "S2", 1.0, Some("TRK-1")),
                fragment("A", "S3", 1.0, Some("TRK-2")),
            ],
            0,
            None,
        );
        assert_eq!(orders.len(), 1);
        let trackings: Vec<&str> = orders[0]
            .shipping
            .packages
            .iter()
            .filter_map(|p| p.label.tracking_number.as_deref())
            .collect();
        assert_eq!(trackings, vec!["TRK-1", "TRK-2"]);
    }

    #[test]
    fn test_packages_start_unallocated() {
        let orders = consolidate(vec![fragment("A", "S1", 1.0, Some("TRK-1"))], 0, None);
        assert!(orders[0].shipping.packages[0].products.is_empty());
    }
}
