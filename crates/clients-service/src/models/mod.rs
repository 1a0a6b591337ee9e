//! 客户服务领域模型

pub mod client;
pub mod client_match;

pub use client::{Client, ClientFilter, NewClient};
pub use client_match::{ClientMatch, NewMatch};
