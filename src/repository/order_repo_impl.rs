// ==========================================
// 跨境电商订单管理系统 - 订单仓储实现 (rusqlite)
// ==========================================
// 职责: 实现批次/订单数据访问
// 红线: 所有查询使用参数化,防止 SQL 注入
// 存储: 结构化检索列 + 订单完整 JSON (detail 列)
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::batch::{Batch, BatchFilter, BatchSummary};
use crate::domain::order::{CanonicalOrder, ShippingPackage};
use crate::domain::types::Platform;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::order_repo::{OrderPage, OrderRepository};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderRepositoryImpl
// ==========================================
pub struct OrderRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepositoryImpl {
    /// 创建新的 Repository 实例 (表结构不存在时一并创建)
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 (连接需已应用统一 PRAGMA)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_order(detail: &str) -> RepositoryResult<CanonicalOrder> {
        Ok(serde_json::from_str(detail)?)
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create_batch_with_orders(
        &self,
        batch: &Batch,
        orders: &[CanonicalOrder],
    ) -> RepositoryResult<usize> {
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO batches (batch_id, name, platforms, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                batch.id,
                batch.name,
                serde_json::to_string(&batch.platforms)?,
                batch.created_at,
            ],
        )?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO orders (
                    batch_id, order_id, order_index, order_reference_number,
                    order_status, platform, purchase_date, detail,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )?;

            for order in orders {
                stmt.execute(params![
                    batch.id,
                    order.order_id,
                    order.order_index as i64,
                    order.order_reference_number,
                    serde_json::to_string(&order.order_status)?,
                    order.metadata.platform.key(),
                    order.metadata.purchase_date,
                    serde_json::to_string(order)?,
                    order.created_at,
                    order.updated_at,
                ])?;
                count += 1;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(count)
    }

    async fn list_batches(&self, filter: &BatchFilter) -> RepositoryResult<Vec<BatchSummary>> {
        let conn = self.lock_conn()?;

        // 过滤条件作用在订单上 (购买日期/平台),再按批次聚合
        let mut conditions: Vec<&str> = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(start) = filter.start_date {
            conditions.push("date(o.purchase_date) >= date(?)");
            args.push(start.format("%Y-%m-%d").to_string());
        }
        if let Some(end) = filter.end_date {
            conditions.push("date(o.purchase_date) <= date(?)");
            args.push(end.format("%Y-%m-%d").to_string());
        }
        if let Some(platform) = filter.platform {
            conditions.push("o.platform = ?");
            args.push(platform.key().to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT b.batch_id, b.name, b.created_at, b.platforms, COUNT(o.order_id)
            FROM batches b
            JOIN orders o ON o.batch_id = b.batch_id
            {where_clause}
            GROUP BY b.batch_id, b.name, b.created_at, b.platforms
            ORDER BY b.created_at DESC
            "#
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, chrono::DateTime<Utc>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (batch_id, batch_name, created_at, platforms_json, order_count) = row?;
            let platforms: Vec<Platform> = serde_json::from_str(&platforms_json)?;
            summaries.push(BatchSummary {
                batch_id,
                batch_name,
                created_at,
                order_count,
                platforms,
            });
        }

        Ok(summaries)
    }

    async fn get_orders_by_batch(
        &self,
        batch_id: &str,
        page: u32,
        limit: u32,
    ) -> RepositoryResult<OrderPage> {
        let conn = self.lock_conn()?;

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM orders WHERE batch_id = ?1",
            params![batch_id],
            |row| row.get(0),
        )?;

        let offset = (page.saturating_sub(1) as i64) * limit as i64;
        let mut stmt = conn.prepare(
            r#"
            SELECT detail FROM orders
            WHERE batch_id = ?1
            ORDER BY order_index ASC
            LIMIT ?2 OFFSET ?3
            "#,
        )?;
        let rows = stmt.query_map(params![batch_id, limit as i64, offset], |row| {
            row.get::<_, String>(0)
        })?;

        let mut orders = Vec::new();
        for detail in rows {
            orders.push(Self::row_to_order(&detail?)?);
        }

        Ok(OrderPage {
            orders,
            total,
            page,
            limit,
        })
    }

    async fn get_order_in_batch(
        &self,
        batch_id: &str,
        order_id: &str,
    ) -> RepositoryResult<Option<CanonicalOrder>> {
        let conn = self.lock_conn()?;

        let detail: Option<String> = conn
            .query_row(
                "SELECT detail FROM orders WHERE batch_id = ?1 AND order_id = ?2",
                params![batch_id, order_id],
                |row| row.get(0),
            )
            .optional()?;

        detail.map(|d| Self::row_to_order(&d)).transpose()
    }

    async fn update_order_packages(
        &self,
        batch_id: &str,
        order_id: &str,
        packages: &[ShippingPackage],
    ) -> RepositoryResult<CanonicalOrder> {
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let detail: Option<String> = tx
            .query_row(
                "SELECT detail FROM orders WHERE batch_id = ?1 AND order_id = ?2",
                params![batch_id, order_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(detail) = detail else {
            return Err(RepositoryError::NotFound {
                entity: "order".to_string(),
                id: format!("{batch_id}/{order_id}"),
            });
        };

        let mut order = Self::row_to_order(&detail)?;
        order.shipping.packages = packages.to_vec();
        order.updated_at = Utc::now();

        tx.execute(
            r#"
            UPDATE orders SET detail = ?1, updated_at = ?2
            WHERE batch_id = ?3 AND order_id = ?4
            "#,
            params![
                serde_json::to_string(&order)?,
                order.updated_at,
                batch_id,
                order_id,
            ],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(order)
    }

    async fn count_orders_in_batch(&self, batch_id: &str) -> RepositoryResult<i64> {
        let conn = self.lock_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM orders WHERE batch_id = ?1",
            params![batch_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
