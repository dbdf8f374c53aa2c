// ==========================================
// 跨境电商订单管理系统 - 批次命名器
// ==========================================
// 职责: 由整批订单的顺序号区间派生人类可读批次名
// ==========================================

use crate::domain::order::CanonicalOrder;

/// 无任何数值顺序号时的回退批次名
pub const FALLBACK_BATCH_NAME: &str = "Batch";

// ==========================================
// name_batch - 批次命名主入口
// ==========================================
/// 收集数值型顺序号 (缺失/不可解析者跳过):
/// - min == max → "{min}"
/// - 否则       → "{min}-{max}"
/// - 一个都没有 → 回退字面量
pub fn name_batch(orders: &[CanonicalOrder]) -> String {
    let references: Vec<i64> = orders
        .iter()
        .filter_map(|o| o.order_reference_number.as_deref())
        .filter_map(|r| r.trim().parse::<i64>().ok())
        .collect();

    match (references.iter().min(), references.iter().max()) {
        (Some(min), Some(max)) if min == max => min.to_string(),
        (Some(min), Some(max)) => format!("{min}-{max}"),
        _ => FALLBACK_BATCH_NAME.to_string(),
    }
}
