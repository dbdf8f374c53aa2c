// ==========================================
// 跨境电商订单管理系统 - 导出层
// ==========================================
// 职责: 将归一化订单渲染为各平台回传/对账文档
// 选择键: {平台 × 文档类型},由工厂静态分发
// ==========================================

pub mod amazon;
pub mod ebay;

// 重导出核心类型
pub use amazon::AmazonShippingConfirmationExporter;
pub use ebay::{EbayAccountingExporter, EbayShippingConfirmationExporter};

use crate::domain::order::CanonicalOrder;
use crate::domain::types::{DocumentType, Platform};
use thiserror::Error;

// ==========================================
// ExportError - 导出层错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("平台 {platform} 不支持文档类型 {doc_type}")]
    UnsupportedCombination {
        platform: String,
        doc_type: String,
    },

    #[error("文档写出失败: {0}")]
    WriteError(String),
}

// 实现 From<csv::Error>
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::WriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// Exporter - 导出器接口
// ==========================================
pub trait Exporter: Send + Sync {
    /// 渲染订单列表为文档字节流
    fn export(&self, orders: &[CanonicalOrder]) -> ExportResult<Vec<u8>>;

    /// 导出文档的文件扩展名 (如 "csv"/"tsv")
    fn file_extension(&self) -> &'static str;
}

// ==========================================
// ExportFactory - 导出器工厂
// ==========================================
pub struct ExportFactory;

impl ExportFactory {
    /// 按 {平台 × 文档类型} 取导出器;未实现的组合返回错误
    pub fn get_exporter(
        platform: Platform,
        doc_type: DocumentType,
    ) -> ExportResult<Box<dyn Exporter>> {
        match (platform, doc_type) {
            (Platform::Ebay, DocumentType::ShippingConfirmation) => {
                Ok(Box::new(EbayShippingConfirmationExporter))
            }
            (Platform::Ebay, DocumentType::Accounting) => Ok(Box::new(EbayAccountingExporter)),
            (Platform::Amazon, DocumentType::ShippingConfirmation) => {
                Ok(Box::new(AmazonShippingConfirmationExporter))
            }
            _ => Err(ExportError::UnsupportedCombination {
                platform: platform.key().to_string(),
                doc_type: doc_type.key().to_string(),
            }),
        }
    }
}

/// csv Writer 收尾: 取回内部缓冲字节
pub(crate) fn into_bytes(writer: csv::Writer<Vec<u8>>) -> ExportResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| ExportError::WriteError(e.to_string()))
}
