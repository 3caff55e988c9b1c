use crate::auth::JwtConfig;
use crate::services::SmtpConfig;
use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATA_DIR | ./data | 数据目录 (嵌入式数据库) |
/// | CLIENT_URL | - | 仪表盘地址 (CORS 白名单) |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | - | JWT 密钥 (生产环境必填) |
/// | SMTP_HOST / SMTP_USER / SMTP_PASS | - | 邮件发送 (密码重置) |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/var/lib/satrack HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据目录，存储嵌入式数据库文件
    pub data_dir: String,
    /// 仪表盘地址 (设置后 CORS 仅允许该来源)
    pub client_url: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// SMTP 配置 (缺省时禁用邮件发送)
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            client_url: std::env::var("CLIENT_URL").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            smtp: SmtpConfig::from_env(),
        }
    }

    /// 嵌入式数据库路径
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("satrack.db")
    }

    /// 确保数据目录存在
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
