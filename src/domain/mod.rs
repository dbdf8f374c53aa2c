// ==========================================
// 跨境电商订单管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与基础类型
// 红线: 不含数据访问逻辑,不含导入/合并逻辑
// ==========================================

pub mod batch;
pub mod order;
pub mod types;

// 重导出核心类型
pub use batch::{Batch, BatchFilter, BatchSummary};
pub use order::{
    CanonicalOrder, FinancialSummary, OrderFragment, OrderMetadata, PackageFragment,
    PackageProduct, ProductLine, Recipient, ShippingAddress, ShippingInfo, ShippingLabel,
    ShippingPackage,
};
pub use types::{DocumentType, OrderStatus, Platform};
