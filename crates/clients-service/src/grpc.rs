//! gRPC 服务端实现
//!
//! 将仓储层暴露为 gRPC 接口，处理 Proto 类型与内部模型之间的转换

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};
use tracing::{error, instrument};

use clients_proto::clients::{
    Client as ProtoClient, DeleteAllClientsRequest, DeleteAllClientsResponse,
    DeleteClientRequest, DeleteClientResponse, GetClientsRequest, GetClientsResponse,
    NewClientRequest, NewClientResponse, NewMatchRequest, NewMatchResponse,
    QueryClientsRequest, QueryClientsResponse, RangeOperator as ProtoRangeOperator,
    ScoreFilter, SortRequest, SortResponse, TimeFilter, clients_service_server::ClientsService,
};

use crate::error::{ClientsError, Result};
use crate::models::{Client, ClientFilter, NewClient, NewMatch};
use crate::query::{FilterPredicate, RangeOperator};
use crate::repository::{ClientRepositoryTrait, MatchLedgerTrait};
use crate::sort::sort_unique;

// ==================== 错误转换 ====================

impl From<ClientsError> for Status {
    fn from(err: ClientsError) -> Self {
        match err {
            ClientsError::Validation(_) => Status::invalid_argument(err.to_string()),
            ClientsError::Storage(_) => {
                error!(code = err.error_code(), error = %err, "Storage operation failed");
                Status::internal(err.to_string())
            }
        }
    }
}

// ==================== 类型转换辅助函数 ====================

/// 将 chrono::DateTime 转换为 prost_types::Timestamp
fn datetime_to_timestamp(dt: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

/// 将 prost_types::Timestamp 转换为 chrono::DateTime
fn timestamp_to_datetime(ts: &prost_types::Timestamp) -> Result<DateTime<Utc>> {
    u32::try_from(ts.nanos)
        .ok()
        .and_then(|nanos| DateTime::from_timestamp(ts.seconds, nanos))
        .ok_or_else(|| {
            ClientsError::validation(format!(
                "时间戳超出范围: seconds={}, nanos={}",
                ts.seconds, ts.nanos
            ))
        })
}

/// 将 Proto RangeOperator 转换为内部 RangeOperator
fn range_operator_from_proto(value: i32) -> Result<RangeOperator> {
    match ProtoRangeOperator::try_from(value) {
        Ok(ProtoRangeOperator::Equal) => Ok(RangeOperator::Equal),
        Ok(ProtoRangeOperator::LessThan) => Ok(RangeOperator::LessThan),
        Ok(ProtoRangeOperator::LessOrEqual) => Ok(RangeOperator::LessOrEqual),
        Ok(ProtoRangeOperator::GreaterThan) => Ok(RangeOperator::GreaterThan),
        Ok(ProtoRangeOperator::GreaterOrEqual) => Ok(RangeOperator::GreaterOrEqual),
        Ok(ProtoRangeOperator::Between) => Ok(RangeOperator::Between),
        Ok(ProtoRangeOperator::Unspecified) | Err(_) => Err(ClientsError::validation(format!(
            "无效的范围运算符: {}",
            value
        ))),
    }
}

fn score_filter_to_predicate(filter: &ScoreFilter) -> Result<FilterPredicate> {
    FilterPredicate::range(
        range_operator_from_proto(filter.op)?,
        filter.values.iter().copied(),
    )
}

fn time_filter_to_predicate(filter: &TimeFilter) -> Result<FilterPredicate> {
    let values = filter
        .values
        .iter()
        .map(timestamp_to_datetime)
        .collect::<Result<Vec<_>>>()?;
    FilterPredicate::range(range_operator_from_proto(filter.op)?, values)
}

/// 将查询请求转换为 ClientFilter
///
/// 范围条件取值数量不合法时直接返回校验错误
fn query_request_to_filter(req: QueryClientsRequest) -> Result<ClientFilter> {
    Ok(ClientFilter {
        id: req.id,
        name: req.name,
        birthday: req
            .birthday
            .as_ref()
            .map(time_filter_to_predicate)
            .transpose()?,
        score: req.score.as_ref().map(score_filter_to_predicate).transpose()?,
        created_at: req
            .created_at
            .as_ref()
            .map(time_filter_to_predicate)
            .transpose()?,
    })
}

/// 将 Client 转换为 Proto Client
fn client_to_proto(client: Client) -> ProtoClient {
    ProtoClient {
        id: client.id,
        name: client.name,
        birthday: client.birthday.map(datetime_to_timestamp),
        score: client.score,
        created_at: client.created_at.map(datetime_to_timestamp),
    }
}

// ==================== gRPC 服务实现 ====================

/// 客户服务 gRPC 实现
pub struct ClientsServiceImpl<CR, ML>
where
    CR: ClientRepositoryTrait,
    ML: MatchLedgerTrait,
{
    clients: Arc<CR>,
    ledger: Arc<ML>,
}

impl<CR, ML> ClientsServiceImpl<CR, ML>
where
    CR: ClientRepositoryTrait,
    ML: MatchLedgerTrait,
{
    pub fn new(clients: Arc<CR>, ledger: Arc<ML>) -> Self {
        Self { clients, ledger }
    }
}

#[tonic::async_trait]
impl<CR, ML> ClientsService for ClientsServiceImpl<CR, ML>
where
    CR: ClientRepositoryTrait + 'static,
    ML: MatchLedgerTrait + 'static,
{
    /// 创建客户
    #[instrument(skip(self, request))]
    async fn new_client(
        &self,
        request: Request<NewClientRequest>,
    ) -> std::result::Result<Response<NewClientResponse>, Status> {
        let req = request.into_inner();

        let birthday = req
            .birthday
            .as_ref()
            .map(timestamp_to_datetime)
            .transpose()?;
        let new_client = NewClient::new(req.name, birthday, req.score);
        new_client.validate()?;

        let id = self.clients.create(&new_client).await?;

        Ok(Response::new(NewClientResponse { id }))
    }

    /// 按条件查询客户 ID
    #[instrument(skip(self, request))]
    async fn query_clients(
        &self,
        request: Request<QueryClientsRequest>,
    ) -> std::result::Result<Response<QueryClientsResponse>, Status> {
        let filter = query_request_to_filter(request.into_inner())?;

        let ids = self.clients.query_ids(&filter).await?;

        Ok(Response::new(QueryClientsResponse { ids }))
    }

    /// 批量获取客户详情
    #[instrument(skip(self, request), fields(requested = request.get_ref().ids.len()))]
    async fn get_clients(
        &self,
        request: Request<GetClientsRequest>,
    ) -> std::result::Result<Response<GetClientsResponse>, Status> {
        let req = request.into_inner();

        if req.ids.is_empty() {
            return Ok(Response::new(GetClientsResponse { clients: vec![] }));
        }

        let clients = self.clients.get_by_ids(&req.ids).await?;

        Ok(Response::new(GetClientsResponse {
            clients: clients.into_iter().map(client_to_proto).collect(),
        }))
    }

    /// 删除客户（幂等）
    #[instrument(skip(self, request), fields(client_id = %request.get_ref().id))]
    async fn delete_client(
        &self,
        request: Request<DeleteClientRequest>,
    ) -> std::result::Result<Response<DeleteClientResponse>, Status> {
        let req = request.into_inner();

        self.clients.delete(&req.id).await?;

        Ok(Response::new(DeleteClientResponse {}))
    }

    /// 清空所有客户
    #[instrument(skip(self, _request))]
    async fn delete_all_clients(
        &self,
        _request: Request<DeleteAllClientsRequest>,
    ) -> std::result::Result<Response<DeleteAllClientsResponse>, Status> {
        self.clients.delete_all().await?;

        Ok(Response::new(DeleteAllClientsResponse {}))
    }

    /// 记录比赛并调整积分
    #[instrument(skip(self, request), fields(client_id = %request.get_ref().client_id))]
    async fn new_match(
        &self,
        request: Request<NewMatchRequest>,
    ) -> std::result::Result<Response<NewMatchResponse>, Status> {
        let req = request.into_inner();

        // client_id 不做存在性或格式校验
        let id = self
            .ledger
            .record_match(&NewMatch::new(req.client_id, req.score))
            .await?;

        Ok(Response::new(NewMatchResponse { id }))
    }

    /// 字符串排序 / 去重
    #[instrument(skip(self, request), fields(items = request.get_ref().items.len()))]
    async fn sort(
        &self,
        request: Request<SortRequest>,
    ) -> std::result::Result<Response<SortResponse>, Status> {
        let req = request.into_inner();

        Ok(Response::new(SortResponse {
            items: sort_unique(req.items, req.remove_duplicates),
        }))
    }
}
