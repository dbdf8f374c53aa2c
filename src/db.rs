// ==========================================
// 跨境电商订单管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 集中建表语句,测试与运行时共用
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout (毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化批次/订单表结构 (幂等)
///
/// orders.detail 保存完整订单 JSON;检索列只为列表/过滤服务
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS batches (
            batch_id   TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            platforms  TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS orders (
            batch_id               TEXT NOT NULL REFERENCES batches(batch_id),
            order_id               TEXT NOT NULL,
            order_index            INTEGER NOT NULL,
            order_reference_number TEXT,
            order_status           TEXT NOT NULL,
            platform               TEXT NOT NULL,
            purchase_date          TEXT NOT NULL,
            detail                 TEXT NOT NULL,
            created_at             TEXT NOT NULL,
            updated_at             TEXT NOT NULL,
            PRIMARY KEY (batch_id, order_id)
        );

        CREATE INDEX IF NOT EXISTS idx_orders_batch_index
            ON orders (batch_id, order_index);
        CREATE INDEX IF NOT EXISTS idx_orders_platform_date
            ON orders (platform, purchase_date);
        "#,
    )
}

/// 默认数据库路径 (数据目录下,目录不存在则回退当前目录)
pub fn get_default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("marketplace-oms").join("orders.db"))
        .and_then(|path| {
            path.parent().and_then(|p| std::fs::create_dir_all(p).ok())?;
            Some(path.display().to_string())
        })
        .unwrap_or_else(|| "orders.db".to_string())
}
