//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 转换流水线只产生 `SignatureError`；配置加载、产物落盘等外围步骤的失败
//! 统一收敛到 `AppError`，命令行入口只需处理这一种错误。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `SignatureError` / `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - `to_api_error` 将任意错误渲染为传输层的 `ApiError`。

use crate::signature::{ApiError, SignatureError};

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 转换流水线错误（载荷 / 格式 / 参数 / 编码）
    #[error("{0}")]
    Signature(#[from] SignatureError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件或环境变量无效
    #[error("配置错误: {0}")]
    Settings(String),

    /// 产物输出目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 请求体无法解析
    #[error("请求体解析失败: {0}")]
    Request(String),
}

impl AppError {
    /// 渲染为传输层错误响应。
    ///
    /// 流水线错误保留原错误码；请求体解析失败视为 `INVALID_PAYLOAD`；其余一律 `INTERNAL_ERROR`。
    pub fn to_api_error(&self) -> ApiError {
        match self {
            Self::Signature(err) => ApiError::from(err),
            Self::Request(msg) => ApiError::from(SignatureError::InvalidPayload(msg.clone())),
            other => ApiError::from(SignatureError::Internal(other.to_string())),
        }
    }
}
