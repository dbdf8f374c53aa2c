// ==========================================
// 跨境电商订单管理系统 - API 层
// ==========================================
// 职责: 对外用例编排 (上传入库/批次查询/文档导出)
// 红线: API 层不直接写 SQL,全部经由 Repository
// ==========================================

pub mod batch_api;
pub mod error;
pub mod upload_api;

// 重导出核心类型
pub use batch_api::{BatchApi, ExportedDocument};
pub use error::{ApiError, ApiResult};
pub use upload_api::{UploadApi, UploadFile, UploadResponse};
