//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 用户/人事管理接口 (含认证与密码重置)
//! - [`customers`] - 客户管理接口 (含往来账)
//! - [`suppliers`] - 供应商管理接口 (含往来账)
//! - [`expenses`] - 费用管理接口 (含费用流水)
//! - [`orders`] - 订单管理接口 (含状态流转)

pub mod health;

// Data models API
pub mod customers;
pub mod expenses;
pub mod orders;
pub mod suppliers;
pub mod users;

use crate::core::ServerState;
use axum::Router;

/// Assemble every entity router into the /api surface
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(customers::router())
        .merge(suppliers::router())
        .merge(expenses::router())
        .merge(orders::router())
}
