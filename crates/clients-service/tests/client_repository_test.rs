//! ClientRepository 集成测试
//!
//! 使用真实 PostgreSQL 验证客户的创建、查询、获取与删除。
//! 各测试通过唯一名称前缀隔离数据，可并行运行。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... \
//!   cargo test --test client_repository_test -- --ignored
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{TimeZone, Utc};
use clients_service::error::ClientsError;
use clients_service::id::IdGenerator;
use clients_service::models::{ClientFilter, NewClient};
use clients_service::query::{FilterPredicate, RangeOperator};
use clients_service::repository::ClientRepository;
use clients_shared::database::Database;
use clients_shared::test_utils::{
    ensure_schema, test_client_name, test_database_config, test_missing_client_id,
};
use sqlx::PgPool;

// ==================== 辅助函数 ====================

async fn setup_pool() -> PgPool {
    let db = Database::connect(&test_database_config())
        .await
        .expect("数据库连接失败");
    ensure_schema(db.pool()).await.expect("建表失败");
    db.pool().clone()
}

/// 按名称子串查询，限定在本测试创建的数据内
fn by_name(name: &str) -> ClientFilter {
    ClientFilter {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// 生成可预测 ID 的生成器
struct SequenceIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl IdGenerator for SequenceIdGenerator {
    fn generate(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::SeqCst))
    }
}

// ==================== 测试用例 ====================

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_create_then_get_round_trip() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);

    let name = test_client_name("roundtrip");
    let birthday = Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap();
    let id = repo
        .create(&NewClient::new(name.clone(), Some(birthday), 42))
        .await
        .unwrap();
    assert!(!id.is_empty());

    let clients = repo.get_by_ids(&[id.clone()]).await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id, id);
    assert_eq!(clients[0].name, name);
    assert_eq!(clients[0].birthday, Some(birthday));
    assert_eq!(clients[0].score, 42);
    assert!(clients[0].created_at.is_some());

    repo.delete(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_create_without_birthday_stores_null() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);

    let id = repo
        .create(&NewClient::new(test_client_name("nobday"), None, 0))
        .await
        .unwrap();

    let clients = repo.get_by_ids(&[id.clone()]).await.unwrap();
    assert_eq!(clients[0].birthday, None);

    repo.delete(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_create_rejects_blank_name() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);

    let err = repo
        .create(&NewClient::new("   ", None, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientsError::Validation(_)));
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_get_ignores_missing_ids() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);

    let id = repo
        .create(&NewClient::new(test_client_name("partial"), None, 1))
        .await
        .unwrap();

    let clients = repo
        .get_by_ids(&[id.clone(), test_missing_client_id()])
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id, id);

    assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());

    repo.delete(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_query_orders_by_score_then_id() {
    let pool = setup_pool().await;
    let name = test_client_name("order");
    let repo = ClientRepository::with_id_generator(
        pool,
        Arc::new(SequenceIdGenerator {
            prefix: name.clone(),
            next: AtomicU64::new(1),
        }),
    );

    // id 依次为 -1, -2, -3
    let low = repo.create(&NewClient::new(name.clone(), None, 5)).await.unwrap();
    let high_b = repo.create(&NewClient::new(name.clone(), None, 10)).await.unwrap();
    let high_a = repo.create(&NewClient::new(name.clone(), None, 10)).await.unwrap();

    let ids = repo.query_ids(&by_name(&name)).await.unwrap();
    let mut high = vec![high_b.clone(), high_a.clone()];
    high.sort();
    assert_eq!(ids, vec![high[0].clone(), high[1].clone(), low.clone()]);

    for id in [low, high_a, high_b] {
        repo.delete(&id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_query_combines_filters() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);
    let name = test_client_name("filters");

    let young = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
    let old = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();

    let a = repo.create(&NewClient::new(name.clone(), Some(young), 20)).await.unwrap();
    let b = repo.create(&NewClient::new(name.clone(), Some(old), 20)).await.unwrap();
    let c = repo.create(&NewClient::new(name.clone(), Some(young), 1)).await.unwrap();

    let filter = ClientFilter {
        name: Some(name.clone()),
        birthday: Some(FilterPredicate::between(
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2002, 1, 1, 0, 0, 0).unwrap(),
        )),
        score: Some(FilterPredicate::range(RangeOperator::GreaterOrEqual, [10i64]).unwrap()),
        ..Default::default()
    };
    assert_eq!(repo.query_ids(&filter).await.unwrap(), vec![a.clone()]);

    let by_id = ClientFilter {
        id: Some(b.clone()),
        ..Default::default()
    };
    assert_eq!(repo.query_ids(&by_id).await.unwrap(), vec![b.clone()]);

    for id in [a, b, c] {
        repo.delete(&id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_name_filter_treats_wildcards_literally() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);
    let name = test_client_name("wild");

    let literal = repo
        .create(&NewClient::new(format!("{}_100%", name), None, 0))
        .await
        .unwrap();
    let other = repo
        .create(&NewClient::new(format!("{}x100y", name), None, 0))
        .await
        .unwrap();

    let ids = repo
        .query_ids(&by_name(&format!("{}_100%", name)))
        .await
        .unwrap();
    assert_eq!(ids, vec![literal.clone()]);

    for id in [literal, other] {
        repo.delete(&id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_delete_is_idempotent() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);

    let id = repo
        .create(&NewClient::new(test_client_name("delete"), None, 0))
        .await
        .unwrap();

    repo.delete(&id).await.unwrap();
    repo.delete(&id).await.unwrap();
    repo.delete(&test_missing_client_id()).await.unwrap();

    assert!(repo.get_by_ids(&[id]).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_get_with_more_ids_than_bind_limit() {
    let pool = setup_pool().await;
    let repo = ClientRepository::new(pool);

    let id = repo
        .create(&NewClient::new(test_client_name("bulk"), None, 0))
        .await
        .unwrap();

    // 超过 Postgres 65535 个绑定参数上限
    let mut ids: Vec<String> = (0..70_000).map(|_| test_missing_client_id()).collect();
    ids.push(id.clone());

    let clients = repo.get_by_ids(&ids).await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id, id);

    repo.delete(&id).await.unwrap();
}
