//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 转换链路的所有失败统一收敛到 `SignatureError`，每个分支对应一个稳定错误码。
//! 通过 `thiserror` 保持人类可读消息，调用侧既可按分支匹配，也可只取 `code()`。
//!
//! ## 实现思路
//!
//! - `ErrorCode` 负责错误码字符串与传输层状态码映射。
//! - 流水线本身不做重试，任何错误都立即返回给调用方。

use serde::Serialize;

/// 转换流水线统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// Base64 格式错误、图片无法解码、体积超限。
    #[error("载荷无效：{0}")]
    InvalidPayload(String),

    /// 目标格式不是 png / jpeg，或编码器无法输出该格式。
    #[error("不支持的格式：{0}")]
    UnsupportedFormat(String),

    /// 宽高非正数、背景色格式错误等参数问题。
    #[error("参数无效：{0}")]
    InvalidOptions(String),

    /// 其余未预期的内部故障。
    #[error("内部错误：{0}")]
    Internal(String),
}

impl SignatureError {
    /// 错误对应的稳定错误码。
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPayload(_) => ErrorCode::InvalidPayload,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            Self::InvalidOptions(_) => ErrorCode::InvalidOptions,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// 不带分类前缀的原始消息。
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidPayload(msg)
            | Self::UnsupportedFormat(msg)
            | Self::InvalidOptions(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// 对外稳定错误码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPayload,
    UnsupportedFormat,
    InvalidOptions,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            Self::InvalidOptions => "INVALID_OPTIONS",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// 传输层状态码映射。
    ///
    /// - `UNSUPPORTED_FORMAT` → 415
    /// - `INVALID_PAYLOAD` / `INVALID_OPTIONS` → 400
    /// - 其余 → 500
    pub fn status_code(self) -> u16 {
        match self {
            Self::UnsupportedFormat => 415,
            Self::InvalidPayload | Self::InvalidOptions => 400,
            Self::InternalError => 500,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
