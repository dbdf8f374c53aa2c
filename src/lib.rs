// ==========================================
// 跨境电商订单管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 多平台订单导出文件的统一入库与回传文档生成
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 平台文档
pub mod export;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DocumentType, OrderStatus, Platform};

// 领域实体
pub use domain::{
    Batch, BatchFilter, BatchSummary, CanonicalOrder, OrderFragment, PackageFragment,
    PackageProduct, ProductLine, ShippingLabel, ShippingPackage,
};

// 导入管道
pub use importer::{ingest_file, ImportError, ImportResult};

// 引擎
pub use engine::{name_batch, validate_package_allocation, AllocationError};

// 导出
pub use export::{ExportError, ExportFactory, Exporter};

// API
pub use api::{ApiError, ApiResult, BatchApi, UploadApi, UploadFile, UploadResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "跨境电商订单管理系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
