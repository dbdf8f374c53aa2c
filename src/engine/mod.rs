// ==========================================
// 跨境电商订单管理系统 - 业务规则层
// ==========================================
// 职责: 导入管道之外的业务规则 (批次命名、配货校验)
// 红线: 不含数据访问逻辑
// ==========================================

pub mod allocation;
pub mod batch_namer;

// 重导出核心类型
pub use allocation::{validate_package_allocation, AllocationError};
pub use batch_namer::{name_batch, FALLBACK_BATCH_NAME};
