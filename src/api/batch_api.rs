// ==========================================
// 跨境电商订单管理系统 - 批次查询/导出 API
// ==========================================
// 职责: 批次列表、批次内订单分页、单订单查询、文档导出
// 红线: 只读编排,不修改任何数据
// ==========================================

use crate::domain::batch::{BatchFilter, BatchSummary};
use crate::domain::order::CanonicalOrder;
use crate::domain::types::{DocumentType, Platform};
use crate::export::ExportFactory;
use crate::repository::{OrderPage, OrderRepository, OrderRepositoryImpl};
use std::sync::Arc;

use super::error::{ApiError, ApiResult};

/// 导出产物: (文件名, 文档字节流)
pub type ExportedDocument = (String, Vec<u8>);

// ==========================================
// BatchApi
// ==========================================
pub struct BatchApi {
    repo: Arc<dyn OrderRepository>,
}

impl BatchApi {
    /// 创建新的 API 实例
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let repo = OrderRepositoryImpl::new(db_path)?;
        Ok(Self {
            repo: Arc::new(repo),
        })
    }

    /// 注入已有仓储 (测试/共享连接场景)
    pub fn with_repository(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// 批次列表 (按订单购买日期/平台过滤)
    pub async fn list_batches(&self, filter: &BatchFilter) -> ApiResult<Vec<BatchSummary>> {
        Ok(self.repo.list_batches(filter).await?)
    }

    /// 批次内订单分页
    pub async fn list_orders_by_batch(
        &self,
        batch_id: &str,
        page: u32,
        limit: u32,
    ) -> ApiResult<OrderPage> {
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
        }
        Ok(self.repo.get_orders_by_batch(batch_id, page, limit).await?)
    }

    /// 批次内单个订单
    pub async fn get_order(&self, batch_id: &str, order_id: &str) -> ApiResult<CanonicalOrder> {
        self.repo
            .get_order_in_batch(batch_id, order_id)
            .await?
            .ok_or_else(|| ApiError::NotFound {
                entity: "订单".to_string(),
                id: format!("{batch_id}/{order_id}"),
            })
    }

    /// 导出整批发货确认单: 按平台分组,每个平台一个文档
    ///
    /// 批次内出现不支持该文档类型的平台时整体失败
    pub async fn export_shipping_confirmations(
        &self,
        batch_id: &str,
    ) -> ApiResult<Vec<ExportedDocument>> {
        self.export_documents(batch_id, DocumentType::ShippingConfirmation)
            .await
    }

    /// 导出整批指定类型文档
    pub async fn export_documents(
        &self,
        batch_id: &str,
        doc_type: DocumentType,
    ) -> ApiResult<Vec<ExportedDocument>> {
        let total = self.repo.count_orders_in_batch(batch_id).await?;
        if total == 0 {
            return Err(ApiError::NotFound {
                entity: "批次".to_string(),
                id: batch_id.to_string(),
            });
        }

        let limit = u32::try_from(total)
            .map_err(|_| ApiError::InvalidInput(format!("批次订单数超出单次导出范围: {total}")))?;
        let page = self.repo.get_orders_by_batch(batch_id, 1, limit).await?;

        // 按平台分组,保持订单在组内的原始顺序
        let mut groups: Vec<(Platform, Vec<CanonicalOrder>)> = Vec::new();
        for order in page.orders {
            let platform = order.metadata.platform;
            match groups.iter_mut().find(|(p, _)| *p == platform) {
                Some((_, orders)) => orders.push(order),
                None => groups.push((platform, vec![order])),
            }
        }

        let mut documents = Vec::new();
        for (platform, orders) in &groups {
            let exporter = ExportFactory::get_exporter(*platform, doc_type)?;
            let bytes = exporter.export(orders)?;
            let file_name = format!(
                "{}-{}.{}",
                platform.key(),
                doc_type.key(),
                exporter.file_extension()
            );
            documents.push((file_name, bytes));
        }

        tracing::info!(
            batch_id = %batch_id,
            doc_type = %doc_type.key(),
            documents = documents.len(),
            "批次文档导出完成"
        );

        Ok(documents)
    }
}
