//! SATRACK Server - 加工安装企业后台管理服务
//!
//! # 架构概述
//!
//! 本模块是 SATRACK 服务端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，实体为完整文档
//! - **往来账** (`ledger`): 客户/供应商/费用的追加式流水与余额计算
//! - **人事汇总** (`payroll`): 人员成本聚合
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! satrack-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓库)
//! ├── ledger/        # 往来账余额计算
//! ├── payroll/       # 人员成本聚合
//! ├── services/      # 邮件服务
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod payroll;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 ____    _  _____ ____      _    ____ _  __
/ ___|  / \|_   _|  _ \    / \  / ___| |/ /
\___ \ / _ \ | | | |_) |  / _ \| |   | ' /
 ___) / ___ \| | |  _ <  / ___ \ |___| . \
|____/_/   \_\_| |_| \_\/_/   \_\____|_|\_\
    "#
    );
}
