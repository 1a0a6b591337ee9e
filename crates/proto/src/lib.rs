//! gRPC 协议定义
//!
//! 由 `proto/clients.proto` 在构建时生成。

pub mod clients {
    tonic::include_proto!("clients.v1");
}
