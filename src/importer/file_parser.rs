// ==========================================
// 跨境电商订单管理系统 - 原始文件解析器
// ==========================================
// 职责: 将上传字节流解码为有序原始行序列
// 红线: 行顺序必须与文件完全一致,order_index 依赖该顺序
// ==========================================
// 三种平台导出格式差异较大,各自独立实现:
// - Amazon: 制表符分隔,首行表头,无前导/结尾
// - eBay:   逗号分隔,表头前有说明文字,结尾有汇总行
// - Temu:   xlsx 二进制,取首个工作表,首行表头
// ==========================================

use crate::domain::types::Platform;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;

/// 一行原始数据: 列名 → 原始字符串值
pub type RawRow = HashMap<String, String>;

/// eBay 表头行定位标记 (两个标记同时出现的行即表头)
const EBAY_HEADER_MARKERS: [&str; 2] = ["Sales Record Number", "Order Number"];

/// eBay 结尾汇总行标记 (命中即丢弃)
const EBAY_FOOTER_MARKERS: [&str; 2] = ["record(s) downloaded", "Seller ID :"];

// ==========================================
// PlatformFileParser - 解析器接口
// ==========================================
pub trait PlatformFileParser {
    /// 将原始字节解码为有序行序列 (保持文件内顺序)
    fn parse(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// AmazonTsvParser - Amazon 制表符分隔解析
// ==========================================
pub struct AmazonTsvParser;

impl PlatformFileParser for AmazonTsvParser {
    fn parse(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let content = strip_bom(bytes);
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(content);

        read_delimited_rows(&mut reader)
    }
}

// ==========================================
// EbayCsvParser - eBay 导出解析
// ==========================================
// eBay 文件在表头前嵌有说明文字,结尾附带下载汇总,
// 需先定位表头行、剔除结尾行,再按带引号 CSV 解析
pub struct EbayCsvParser;

impl PlatformFileParser for EbayCsvParser {
    fn parse(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let content = String::from_utf8_lossy(strip_bom(bytes));
        let lines: Vec<&str> = content.lines().collect();

        // 定位表头行 (未找到则整体失败,不产出任何行)
        let header_index = lines
            .iter()
            .position(|line| EBAY_HEADER_MARKERS.iter().all(|m| line.contains(m)))
            .ok_or_else(|| {
                ImportError::HeaderNotFound(EBAY_HEADER_MARKERS.join(" / "))
            })?;

        // 表头行起,剔除结尾汇总与空行
        let data_lines: Vec<&str> = lines[header_index..]
            .iter()
            .filter(|line| {
                !EBAY_FOOTER_MARKERS.iter().any(|m| line.contains(m))
                    && !line.trim().is_empty()
            })
            .copied()
            .collect();

        let csv_content = data_lines.join("\n");
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_content.as_bytes());

        let rows = read_delimited_rows(&mut reader)?;

        // 剩余的残缺汇总行没有销售记录号,一并丢弃
        Ok(rows
            .into_iter()
            .filter(|row| {
                row.get(EBAY_HEADER_MARKERS[0])
                    .map(|v| !v.trim().is_empty())
                    .unwrap_or(false)
            })
            .collect())
    }
}

// ==========================================
// TemuExcelParser - Temu xlsx 解析
// ==========================================
pub struct TemuExcelParser;

impl PlatformFileParser for TemuExcelParser {
    fn parse(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError("Excel 文件无工作表".to_string()));
        }
        let sheet_name = sheet_names[0].clone();

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = RawRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 平台分发
// ==========================================

/// 按平台选择解析器并解码文件
pub fn parse_platform_file(platform: Platform, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
    match platform {
        Platform::Temu => TemuExcelParser.parse(bytes),
        Platform::Ebay => EbayCsvParser.parse(bytes),
        Platform::Amazon => AmazonTsvParser.parse(bytes),
        Platform::Unknown => Err(ImportError::UnsupportedPlatform("unknown".to_string())),
    }
}

/// 嗅探上传文件的表头集合 (用于表头模式平台检测)
///
/// xlsx (zip 魔数) 走工作表首行;文本文件取首个非空行,
/// 含制表符按 TSV 切分,否则按 CSV 切分
pub fn sniff_headers(bytes: &[u8]) -> ImportResult<Vec<String>> {
    if bytes.starts_with(b"PK\x03\x04") {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Ok(Vec::new());
        }
        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
        return Ok(range
            .rows()
            .next()
            .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
            .unwrap_or_default());
    }

    let content = String::from_utf8_lossy(strip_bom(bytes));
    let Some(first_line) = content.lines().find(|l| !l.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    let delimiter = if first_line.contains('\t') { '\t' } else { ',' };
    Ok(first_line
        .split(delimiter)
        .map(|h| h.trim().trim_matches('"').to_string())
        .collect())
}

// ==========================================
// 内部辅助
// ==========================================

/// 剥离 UTF-8 BOM
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes)
}

/// 将 csv reader 的记录读为有序行序列 (跳过全空行)
fn read_delimited_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> ImportResult<Vec<RawRow>> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row_map = RawRow::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amazon_parser_basic() {
        let data = b"order-id\tsku\tquantity-purchased\n111-001\tSKU-A\t2\n111-002\tSKU-B\t1\n";
        let rows = AmazonTsvParser.parse(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("order-id").unwrap(), "111-001");
        assert_eq!(rows[1].get("sku").unwrap(), "SKU-B");
    }

    #[test]
    fn test_amazon_parser_preserves_row_order() {
        let data = b"order-id\tsku\nZ\tS1\nA\tS2\nM\tS3\n";
        let rows = AmazonTsvParser.parse(data).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r["order-id"].as_str()).collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_ebay_parser_strips_preamble_and_footer() {
        let data = b"\xef\xbb\xbfDownload report\n\nSales Record Number,Order Number,Item Title\n100,ORD-1,Widget\n101,ORD-2,Gadget\n2 record(s) downloaded\nSeller ID : someone\n";
        let rows = EbayCsvParser.parse(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Order Number").unwrap(), "ORD-1");
        assert_eq!(rows[1].get("Item Title").unwrap(), "Gadget");
    }

    #[test]
    fn test_ebay_parser_missing_header_fails_without_rows() {
        let data = b"just some text\nwithout any header line\n";
        let err = EbayCsvParser.parse(data).unwrap_err();
        assert!(matches!(err, ImportError::HeaderNotFound(_)));
    }

    #[test]
    fn test_ebay_parser_quoted_fields() {
        let data = b"Sales Record Number,Order Number,Item Title\n100,ORD-1,\"Widget, large\"\n";
        let rows = EbayCsvParser.parse(data).unwrap();
        assert_eq!(rows[0].get("Item Title").unwrap(), "Widget, large");
    }

    #[test]
    fn test_temu_parser_rejects_non_xlsx() {
        let err = TemuExcelParser.parse(b"not an excel file").unwrap_err();
        assert!(matches!(err, ImportError::ExcelParseError(_)));
    }

    #[test]
    fn test_sniff_headers_tsv() {
        let headers = sniff_headers(b"order-id\tsku\tquantity-purchased\nrow\r\n").unwrap();
        assert_eq!(headers, vec!["order-id", "sku", "quantity-purchased"]);
    }

    #[test]
    fn test_sniff_headers_csv() {
        let headers = sniff_headers(b"a,b,c\n1,2,3\n").unwrap();
        assert_eq!(headers, vec!["a", "b", "c"]);
    }
}
