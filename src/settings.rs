//! 配置加载模块
//!
//! # 设计思路
//!
//! 转换配置只有少量阈值，按“默认值 → JSON 文件 → 环境变量”逐层覆盖，
//! 最后统一校验一次。配置文件不存在视为使用默认值，存在但无法解析则报错，
//! 避免错误配置被静默忽略。

use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::signature::SignatureConfig;

/// 配置文件路径环境变量。
pub const CONFIG_PATH_ENV: &str = "SIGNATURE_CONFIG";
/// 载荷上限覆盖环境变量（十进制字节数）。
pub const MAX_PAYLOAD_BYTES_ENV: &str = "SIGNATURE_MAX_PAYLOAD_BYTES";

/// 加载并校验转换配置。
pub fn load_config(path: Option<&Path>) -> Result<SignatureConfig, AppError> {
    let config = match path {
        Some(path) => load_config_from_path(path)?,
        None => SignatureConfig::default(),
    };

    let config = apply_env_override(config, std::env::var(MAX_PAYLOAD_BYTES_ENV).ok())?;
    config
        .validate()
        .map_err(|e| AppError::Settings(e.to_string()))?;

    log::info!(
        "⚙️ 配置已加载（maxPayloadBytes={}, maxDecodedPixels={}, jpegQuality={}）",
        config.max_payload_bytes,
        config.max_decoded_pixels,
        config.jpeg_quality
    );

    Ok(config)
}

fn load_config_from_path(config_path: &Path) -> Result<SignatureConfig, AppError> {
    if !config_path.exists() {
        log::warn!("配置文件不存在，使用默认配置: {}", config_path.display());
        return Ok(SignatureConfig::default());
    }

    let content = fs::read_to_string(config_path)?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::Settings(format!("解析配置文件 '{}' 失败: {}", config_path.display(), e))
    })
}

fn apply_env_override(
    mut config: SignatureConfig,
    max_payload_bytes: Option<String>,
) -> Result<SignatureConfig, AppError> {
    if let Some(raw) = max_payload_bytes {
        config.max_payload_bytes = raw.trim().parse().map_err(|e| {
            AppError::Settings(format!(
                "{} 不是合法的字节数 '{}': {}",
                MAX_PAYLOAD_BYTES_ENV, raw, e
            ))
        })?;
    }
    Ok(config)
}
