// ==========================================
// 跨境电商订单管理系统 - 平台检测器
// ==========================================
// 职责: 从显式提示词或上传文件表头解析来源平台
// 约束: Unknown 对整个文件是硬失败,调用方不得部分解析
// ==========================================

use crate::domain::types::Platform;
use crate::importer::columns::schema_for;
use std::collections::HashSet;

/// 表头重合率阈值 (达到该比例才认为命中平台)
pub const HEADER_MATCH_THRESHOLD: f64 = 0.9;

/// 提示词模式: 大小写不敏感的子串匹配,先命中先得
///
/// # 参数
/// - hint: 自由文本提示 (如前端传入的平台名)
pub fn detect_platform(hint: &str) -> Platform {
    let lower = hint.to_lowercase();
    for platform in Platform::known() {
        if lower.contains(platform.key()) {
            return platform;
        }
    }
    Platform::Unknown
}

/// 表头模式: 对每个平台计算别名重合率,唯一达标者胜出
///
/// # 规则
/// - 重合率 = 命中别名数 / 该平台别名总数
/// - 达到阈值的平台恰好一个 → 选中
/// - 零个或多个达标 (并列) → Unknown
pub fn detect_platform_by_headers(headers: &[String]) -> Platform {
    if headers.is_empty() {
        return Platform::Unknown;
    }

    let provided: HashSet<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut candidates = Vec::new();
    for platform in Platform::known() {
        let Some(schema) = schema_for(platform) else {
            continue;
        };
        let aliases: Vec<String> = schema
            .flatten()
            .iter()
            .map(|a| a.to_lowercase())
            .collect();
        if aliases.is_empty() {
            continue;
        }

        let match_count = aliases.iter().filter(|a| provided.contains(*a)).count();
        let ratio = match_count as f64 / aliases.len() as f64;
        if ratio >= HEADER_MATCH_THRESHOLD {
            candidates.push(platform);
        }
    }

    match candidates.as_slice() {
        [single] => *single,
        _ => Platform::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::columns::{AMAZON_COLUMNS, EBAY_COLUMNS};

    #[test]
    fn test_detect_by_hint() {
        assert_eq!(detect_platform("Temu Orders Export"), Platform::Temu);
        assert_eq!(detect_platform("EBAY"), Platform::Ebay);
        assert_eq!(detect_platform("amazon-report"), Platform::Amazon);
        assert_eq!(detect_platform("aliexpress"), Platform::Unknown);
    }

    #[test]
    fn test_detect_by_headers_full_match() {
        let headers: Vec<String> = AMAZON_COLUMNS
            .flatten()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(detect_platform_by_headers(&headers), Platform::Amazon);
    }

    #[test]
    fn test_detect_by_headers_case_insensitive() {
        let headers: Vec<String> = EBAY_COLUMNS
            .flatten()
            .iter()
            .map(|s| s.to_uppercase())
            .collect();
        assert_eq!(detect_platform_by_headers(&headers), Platform::Ebay);
    }

    #[test]
    fn test_detect_by_headers_partial_match_is_unknown() {
        // 只取 40% 左右的列名,低于阈值
        let all: Vec<&str> = AMAZON_COLUMNS.flatten();
        let headers: Vec<String> = all
            .iter()
            .take(all.len() * 2 / 5)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(detect_platform_by_headers(&headers), Platform::Unknown);
    }

    #[test]
    fn test_detect_by_headers_empty_is_unknown() {
        assert_eq!(detect_platform_by_headers(&[]), Platform::Unknown);
    }
}
