// ==========================================
// 跨境电商订单管理系统 - 命令行入口
// ==========================================
// 用法: marketplace-oms <平台提示>=<文件路径> [...]
// 环境变量: OMS_DB_PATH 数据库路径; OMS_REFERENCE_START 顺序号起点
// ==========================================

use marketplace_oms::api::{UploadApi, UploadFile};
use marketplace_oms::db;
use marketplace_oms::logging;
use marketplace_oms::repository::OrderRepositoryImpl;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", marketplace_oms::APP_NAME);
    tracing::info!("系统版本: {}", marketplace_oms::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("用法: marketplace-oms <平台提示>=<文件路径> [...]");
        eprintln!("示例: marketplace-oms ebay=orders.csv temu=orders.xlsx");
        std::process::exit(2);
    }

    // === 数据库初始化 ===
    let db_path =
        std::env::var("OMS_DB_PATH").unwrap_or_else(|_| db::get_default_db_path());
    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;
    tracing::info!(db_path = %db_path, "数据库就绪");

    // === 上传文件装载 ===
    let mut files = Vec::new();
    for arg in &args {
        let Some((hint, path)) = arg.split_once('=') else {
            anyhow::bail!("参数格式错误 (应为 平台提示=文件路径): {arg}");
        };
        let bytes = std::fs::read(path)?;
        files.push(UploadFile {
            file_name: path.to_string(),
            platform_hint: hint.to_string(),
            bytes,
        });
    }

    let reference_start = std::env::var("OMS_REFERENCE_START")
        .ok()
        .and_then(|v| v.parse::<i64>().ok());

    // === 导入入库 ===
    let repo = OrderRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)));
    let api = UploadApi::with_repository(Arc::new(repo));
    let response = api.process_order_upload(&files, reference_start).await?;

    println!(
        "批次 {} ({}) 创建完成, 共 {} 个订单, 平台: {}",
        response.batch_name,
        response.batch_id,
        response.order_count,
        response
            .platforms
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
