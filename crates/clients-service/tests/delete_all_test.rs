//! 清空客户表集成测试
//!
//! 清空操作会影响全表，单独放在一个测试二进制中，避免与其他并行测试互相干扰。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... \
//!   cargo test --test delete_all_test -- --ignored
//! ```

use clients_service::models::{ClientFilter, NewClient};
use clients_service::repository::ClientRepository;
use clients_shared::database::Database;
use clients_shared::test_utils::{ensure_schema, test_client_name, test_database_config};

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_query_all_by_score_then_delete_all() {
    let db = Database::connect(&test_database_config())
        .await
        .expect("数据库连接失败");
    ensure_schema(db.pool()).await.expect("建表失败");
    let repo = ClientRepository::new(db.pool().clone());

    // 先清空，保证无条件查询只看到本测试写入的数据
    repo.delete_all().await.unwrap();

    let mut created = Vec::new();
    for score in [5, 20, 1] {
        let id = repo
            .create(&NewClient::new(test_client_name("wipe"), None, score))
            .await
            .unwrap();
        created.push(id);
    }

    // 无条件查询返回全部客户，按积分降序
    let ids = repo.query_ids(&ClientFilter::default()).await.unwrap();
    assert_eq!(
        ids,
        vec![created[1].clone(), created[0].clone(), created[2].clone()]
    );

    let deleted = repo.delete_all().await.unwrap();
    assert_eq!(deleted, 3);
    assert!(repo.query_ids(&ClientFilter::default()).await.unwrap().is_empty());

    // 清空后仍可正常创建
    let id = repo
        .create(&NewClient::new(test_client_name("after-wipe"), None, 0))
        .await
        .unwrap();
    assert_eq!(repo.get_by_ids(&[id.clone()]).await.unwrap().len(), 1);

    repo.delete(&id).await.unwrap();
    assert!(db.close().await);
    assert!(!db.close().await);
}
