//! 认证模块 - JWT 认证体系
//!
//! - [`JwtService`] - 令牌生成与验证
//! - [`require_auth`] - Axum 认证中间件
//! - [`CurrentUser`] - 请求上下文中的当前用户

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
