// ==========================================
// 跨境电商订单管理系统 - 订单仓储接口
// ==========================================
// 职责: 定义批次/订单数据访问接口
// 红线: Repository 不含业务规则;配货校验在 API 层完成后才落库
// ==========================================

use crate::domain::batch::{Batch, BatchFilter, BatchSummary};
use crate::domain::order::{CanonicalOrder, ShippingPackage};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// OrderPage - 分页查询结果
// ==========================================
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<CanonicalOrder>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

// ==========================================
// OrderRepository - 订单仓储接口
// ==========================================
// 批次与其订单在同一事务内写入;本层不做重试,
// 也不回滚此前已成功的独立步骤,错误原样向上传播
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 创建批次并写入其全部订单 (单事务),返回写入订单数
    async fn create_batch_with_orders(
        &self,
        batch: &Batch,
        orders: &[CanonicalOrder],
    ) -> RepositoryResult<usize>;

    /// 批次列表 (可按购买日期区间/平台过滤),按创建时间倒序
    async fn list_batches(&self, filter: &BatchFilter) -> RepositoryResult<Vec<BatchSummary>>;

    /// 按批次分页取订单,按 order_index 升序
    async fn get_orders_by_batch(
        &self,
        batch_id: &str,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<OrderPage>;

    /// 批次内单个订单
    async fn get_order_in_batch(
        &self,
        batch_id: &str,
        order_id: &str,
    ) -> RepositoryResult<Option<CanonicalOrder>>;

    /// 整体替换订单的包裹列表,返回更新后的订单
    async fn update_order_packages(
        &self,
        batch_id: &str,
        order_id: &str,
        packages: &[ShippingPackage],
    ) -> RepositoryResult<CanonicalOrder>;

    /// 批次内订单数
    async fn count_orders_in_batch(&self, batch_id: &str) -> RepositoryResult<i64>;
}
