// ==========================================
// 批次文档导出集成测试
// ==========================================
// 目标: 验证上传 → 配货 → 按平台分组导出的完整链路
// ==========================================

use marketplace_oms::api::{ApiError, BatchApi, UploadApi, UploadFile};
use marketplace_oms::db;
use marketplace_oms::domain::order::{PackageProduct, ShippingLabel, ShippingPackage};
use marketplace_oms::domain::types::DocumentType;
use marketplace_oms::repository::{OrderRepository, OrderRepositoryImpl};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn create_test_repo() -> (TempDir, Arc<dyn OrderRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("orders.db");
    let conn = db::open_sqlite_connection(db_path.to_str().unwrap()).unwrap();
    db::init_schema(&conn).unwrap();
    let repo = OrderRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)));
    (dir, Arc::new(repo))
}

fn amazon_upload() -> UploadFile {
    let data = "order-id\tproduct-name\tsku\tquantity-purchased\trecipient-name\torder-item-id\n\
        111-A\tWidget\tSKU-1\t1\tAlice\tITEM-1\n";
    UploadFile {
        file_name: "amazon.txt".to_string(),
        platform_hint: "amazon".to_string(),
        bytes: data.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn test_export_shipping_confirmations_after_allocation() {
    let (_dir, repo) = create_test_repo();
    let upload = UploadApi::with_repository(repo.clone());
    let batches = BatchApi::with_repository(repo);

    let response = upload
        .process_order_upload(&[amazon_upload()], Some(1))
        .await
        .unwrap();

    let packages = vec![ShippingPackage {
        label: ShippingLabel {
            tracking_number: Some("1Z777".to_string()),
            carrier: Some("UPS".to_string()),
            service_type: Some("Ground".to_string()),
            cost: None,
        },
        products: vec![PackageProduct {
            sku: "SKU-1".to_string(),
            quantity: 1.0,
        }],
    }];
    upload
        .assign_packages(&response.batch_id, "111-A", &packages)
        .await
        .unwrap();

    let documents = batches
        .export_shipping_confirmations(&response.batch_id)
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);

    let (file_name, bytes) = &documents[0];
    assert_eq!(file_name, "amazon-shipping-confirmation.tsv");

    let text = String::from_utf8(bytes.clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("order-id\torder-item-id"));
    assert!(lines[1].contains("111-A"));
    assert!(lines[1].contains("ITEM-1"));
    assert!(lines[1].contains("1Z777"));
}

#[tokio::test]
async fn test_export_unsupported_combination_fails_whole_batch() {
    let (_dir, repo) = create_test_repo();
    let upload = UploadApi::with_repository(repo.clone());
    let batches = BatchApi::with_repository(repo);

    // Amazon 没有记账单导出,整批导出失败
    let response = upload
        .process_order_upload(&[amazon_upload()], None)
        .await
        .unwrap();

    let err = batches
        .export_documents(&response.batch_id, DocumentType::Accounting)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Export(_)));
}

#[tokio::test]
async fn test_export_unknown_batch_not_found() {
    let (_dir, repo) = create_test_repo();
    let batches = BatchApi::with_repository(repo);

    let err = batches
        .export_shipping_confirmations("no-such-batch")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}
