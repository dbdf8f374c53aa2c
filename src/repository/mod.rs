// ==========================================
// 跨境电商订单管理系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑;所有查询使用参数化
// ==========================================

pub mod error;
pub mod order_repo;
pub mod order_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::{OrderPage, OrderRepository};
pub use order_repo_impl::OrderRepositoryImpl;
