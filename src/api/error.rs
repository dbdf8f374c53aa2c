// ==========================================
// 跨境电商订单管理系统 - API 层错误类型
// ==========================================
// 职责: 汇聚各层错误并转换为对外稳定的错误信息
// ==========================================

use crate::engine::AllocationError;
use crate::export::ExportError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效的请求参数: {0}")]
    InvalidInput(String),

    #[error("{entity} 不存在: {id}")]
    NotFound { entity: String, id: String },

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配货校验失败: {0}")]
    Allocation(#[from] AllocationError),

    #[error("数据访问失败: {0}")]
    Repository(#[from] RepositoryError),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("内部错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
