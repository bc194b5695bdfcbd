//! # 配置模块
//!
//! ## 设计思路
//!
//! 将转换链路的可调阈值集中到 `SignatureConfig`。配置在进程生命周期内只读，
//! 由 `SignatureConverter` 持有，多线程并发调用无需加锁。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的默认值（载荷上限 2,000,000 字节）。
//! - `validate` 在构建转换器时执行一次，拒绝无意义的阈值。
//! - 支持 serde（camelCase + 字段级默认值），由 `settings` 模块从 JSON 文件加载。

use serde::{Deserialize, Serialize};

use super::SignatureError;

/// 转换配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignatureConfig {
    /// Base64 解码后允许的最大字节数。
    pub max_payload_bytes: u64,
    /// 解码前按图片头尺寸检查的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// JPEG 编码质量（1~100）。
    pub jpeg_quality: u8,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: 2_000_000,
            max_decoded_pixels: 40_000_000,
            jpeg_quality: 75,
        }
    }
}

impl SignatureConfig {
    /// 仅覆盖载荷上限，其余保持默认。
    ///
    /// # 示例
    /// ```rust
    /// use signature_convert::signature::SignatureConfig;
    ///
    /// let config = SignatureConfig::with_max_payload_bytes(512 * 1024);
    /// assert_eq!(config.max_payload_bytes, 512 * 1024);
    /// ```
    pub fn with_max_payload_bytes(max_payload_bytes: u64) -> Self {
        Self {
            max_payload_bytes,
            ..Self::default()
        }
    }

    /// 校验阈值合法性。
    pub fn validate(&self) -> Result<(), SignatureError> {
        if self.max_payload_bytes == 0 {
            return Err(SignatureError::InvalidOptions(
                "maxPayloadBytes 必须大于 0".to_string(),
            ));
        }
        if self.max_decoded_pixels == 0 {
            return Err(SignatureError::InvalidOptions(
                "maxDecodedPixels 必须大于 0".to_string(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SignatureError::InvalidOptions(format!(
                "jpegQuality 必须在 1~100 之间（当前：{}）",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
