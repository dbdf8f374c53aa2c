// ==========================================
// 跨境电商订单管理系统 - 包裹配货校验器
// ==========================================
// 职责: 校验包裹分配数量与购买数量逐 SKU 精确一致
// 约束: 仅在显式 (重新) 配货时运行;导入刚结束时包裹普遍为空,
//       不在合并阶段校验
// ==========================================

use crate::domain::order::{PackageProduct, ProductLine, ShippingPackage};
use std::collections::HashMap;
use thiserror::Error;

// ==========================================
// AllocationError - 配货不一致错误
// ==========================================
// 首个不一致即终止并整体拒绝,不做部分写入
#[derive(Error, Debug, Clone, PartialEq)]
#[error("SKU {sku} 配货数量不一致: 应配 {expected}, 实配 {actual}")]
pub struct AllocationError {
    pub sku: String,
    pub expected: f64,
    pub actual: f64,
}

// ==========================================
// validate_package_allocation - 配货校验主入口
// ==========================================
/// 逐 SKU 比对: sum(商品行购买量) == sum(各包裹分配量)
///
/// 多配与少配均拒绝;按商品行首次出现顺序报告首个不一致
pub fn validate_package_allocation(
    products: &[ProductLine],
    packages: &[ShippingPackage],
) -> Result<(), AllocationError> {
    // 购买总量 (保留 SKU 首次出现顺序,保证报错确定性)
    let mut purchased: HashMap<&str, f64> = HashMap::new();
    let mut sku_order: Vec<&str> = Vec::new();
    for product in products {
        let entry = purchased.entry(product.sku.as_str()).or_insert_with(|| {
            sku_order.push(product.sku.as_str());
            0.0
        });
        *entry += product.quantity_purchased;
    }

    // 分配总量
    let mut allocated: HashMap<&str, f64> = HashMap::new();
    for package in packages {
        for PackageProduct { sku, quantity } in &package.products {
            *allocated.entry(sku.as_str()).or_insert(0.0) += quantity;
        }
    }

    for sku in sku_order {
        let expected = purchased[sku];
        let actual = allocated.get(sku).copied().unwrap_or(0.0);
        if actual != expected {
            return Err(AllocationError {
                sku: sku.to_string(),
                expected,
                actual,
            });
        }
    }

    Ok(())
}
