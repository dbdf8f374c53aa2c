// ==========================================
// 跨境电商订单管理系统 - 上传 API
// ==========================================
// 职责: 多文件导入编排 (序号续接 → 批次命名 → 单事务落库)
//       与配货写入 (先校验后落库)
// 红线: 任一文件解析失败则整次上传失败,不产生半成品批次
// ==========================================

use crate::domain::batch::Batch;
use crate::domain::order::{CanonicalOrder, ShippingPackage};
use crate::domain::types::Platform;
use crate::engine::{name_batch, validate_package_allocation};
use crate::importer::ingest_file;
use crate::repository::{OrderRepository, OrderRepositoryImpl, RepositoryError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ApiError, ApiResult};

// ==========================================
// 请求/响应类型
// ==========================================

/// 单个上传文件 (文件名兼作平台提示词)
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub platform_hint: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub batch_id: String,
    pub batch_name: String,
    pub order_count: usize,
    pub platforms: Vec<Platform>,
}

// ==========================================
// UploadApi
// ==========================================
pub struct UploadApi {
    repo: Arc<dyn OrderRepository>,
}

impl UploadApi {
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

    /// 处理一次订单上传 (一个或多个文件归入同一批次)
    ///
    /// 文件按给定顺序处理,订单序号跨文件连续;
    /// reference_start 给定时按全局序号派生顺序号
    pub async fn process_order_upload(
        &self,
        files: &[UploadFile],
        reference_start: Option<i64>,
    ) -> ApiResult<UploadResponse> {
        if files.is_empty() {
            return Err(ApiError::InvalidInput("上传文件列表为空".to_string()));
        }

        let mut all_orders: Vec<CanonicalOrder> = Vec::new();
        let mut platforms: Vec<Platform> = Vec::new();

        for file in files {
            let orders = ingest_file(
                &file.bytes,
                &file.platform_hint,
                all_orders.len(),
                reference_start,
            )?;

            if orders.is_empty() {
                tracing::warn!(file = %file.file_name, "文件未产出任何订单,跳过");
                continue;
            }

            let platform = orders[0].metadata.platform;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
            all_orders.extend(orders);
        }

        if all_orders.is_empty() {
            return Err(ApiError::InvalidInput(
                "所有文件均未产出订单".to_string(),
            ));
        }

        let batch = Batch::new(name_batch(&all_orders), platforms.clone());
        let count = self
            .repo
            .create_batch_with_orders(&batch, &all_orders)
            .await?;

        tracing::info!(
            batch_id = %batch.id,
            batch_name = %batch.name,
            orders = count,
            "批次创建完成"
        );

        Ok(UploadResponse {
            batch_id: batch.id,
            batch_name: batch.name,
            order_count: count,
            platforms,
        })
    }

    /// 为订单写入包裹配货 (先校验分配守恒,再整体替换)
    pub async fn assign_packages(
        &self,
        batch_id: &str,
        order_id: &str,
        packages: &[ShippingPackage],
    ) -> ApiResult<CanonicalOrder> {
        let order = self
            .repo
            .get_order_in_batch(batch_id, order_id)
            .await?
            .ok_or_else(|| ApiError::NotFound {
                entity: "订单".to_string(),
                id: format!("{batch_id}/{order_id}"),
            })?;

        validate_package_allocation(&order.products, packages)?;

        let updated = self
            .repo
            .update_order_packages(batch_id, order_id, packages)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound { entity, id } => ApiError::NotFound { entity, id },
                other => ApiError::Repository(other),
            })?;

        tracing::info!(
            batch_id = %batch_id,
            order_id = %order_id,
            packages = packages.len(),
            "配货写入完成"
        );

        Ok(updated)
    }
}
