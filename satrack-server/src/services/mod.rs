//! 服务模块
//!
//! - [`Mailer`] - SMTP 邮件发送 (密码重置验证码)

pub mod email;

pub use email::{Mailer, SmtpConfig};
