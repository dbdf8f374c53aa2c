// ==========================================
// 跨境电商订单管理系统 - 导入层
// ==========================================
// 职责: 字节流 → 平台检测 → 行解析 → 归一化 → 订单合并
// 红线: 纯内存转换,不做任何持久化;失败即整体失败,无部分产出
// ==========================================

// 模块声明
pub mod columns;
pub mod consolidator;
pub mod detector;
pub mod error;
pub mod file_parser;
pub mod normalizer;

// 重导出核心类型
pub use columns::{schema_for, ColumnSchema, AMAZON_COLUMNS, EBAY_COLUMNS, TEMU_COLUMNS};
pub use consolidator::consolidate;
pub use detector::{detect_platform, detect_platform_by_headers, HEADER_MATCH_THRESHOLD};
pub use error::{ImportError, ImportResult};
pub use file_parser::{
    parse_platform_file, sniff_headers, AmazonTsvParser, EbayCsvParser, PlatformFileParser,
    RawRow, TemuExcelParser,
};
pub use normalizer::normalize_row;

use crate::domain::order::CanonicalOrder;
use crate::domain::types::Platform;

// ==========================================
// ingest_file - 单文件导入主入口
// ==========================================
/// 将一个上传文件转换为有序归一化订单序列
///
/// # 参数
/// - bytes: 文件原始字节
/// - platform_hint: 平台提示词;无法据此命中时回退表头检测
/// - prior_order_count: 同批次前序文件已产出的订单数 (序号续接点)
/// - reference_start: 外部顺序号起点 (可选)
///
/// # 错误
/// - 平台无法识别: 在解析任何行之前失败
/// - 文件格式损坏 (如 eBay 表头缺失): 在产出任何片段之前失败
pub fn ingest_file(
    bytes: &[u8],
    platform_hint: &str,
    prior_order_count: usize,
    reference_start: Option<i64>,
) -> ImportResult<Vec<CanonicalOrder>> {
    // === 步骤 1: 平台检测 (提示词优先,表头兜底) ===
    let mut platform = detect_platform(platform_hint);
    if platform == Platform::Unknown {
        let headers = sniff_headers(bytes)?;
        platform = detect_platform_by_headers(&headers);
    }
    let schema = schema_for(platform)
        .ok_or_else(|| ImportError::UnsupportedPlatform(platform_hint.to_string()))?;

    tracing::debug!(platform = %platform, "平台检测完成");

    // === 步骤 2: 解析原始行 (保持文件顺序) ===
    let rows = parse_platform_file(platform, bytes)?;

    // === 步骤 3: 逐行归一化 ===
    let fragments = rows
        .iter()
        .map(|row| normalize_row(platform, schema, row))
        .collect();

    // === 步骤 4: 合并为归一化订单 ===
    let orders = consolidate(fragments, prior_order_count, reference_start);

    tracing::info!(
        platform = %platform,
        rows = rows.len(),
        orders = orders.len(),
        "文件导入完成"
    );

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_amazon_file_end_to_end() {
        let data = b"order-id\tproduct-name\tsku\tquantity-purchased\trecipient-name\n\
            111-A\tWidget\tSKU-1\t2\tAlice\n\
            111-A\tGadget\tSKU-2\t1\tAlice\n\
            222-B\tWidget\tSKU-1\t1\tBob\n";
        let orders = ingest_file(data, "amazon", 0, Some(10)).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, "111-A");
        assert_eq!(orders[0].products.len(), 2);
        assert_eq!(orders[0].order_reference_number.as_deref(), Some("10"));
        assert_eq!(orders[1].order_reference_number.as_deref(), Some("11"));
    }

    #[test]
    fn test_ingest_unknown_platform_fails_before_parsing() {
        let err = ingest_file(b"a,b\n1,2\n", "aliexpress", 0, None).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedPlatform(_)));
    }

    #[test]
    fn test_ingest_falls_back_to_header_detection() {
        // 提示词无效,但表头与 Amazon 列名全量重合
        let headers = AMAZON_COLUMNS.flatten().join("\t");
        let data = format!("{headers}\n");
        let orders = ingest_file(data.as_bytes(), "", 0, None).unwrap();
        assert!(orders.is_empty());
    }
}
