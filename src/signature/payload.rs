//! # 载荷解码模块
//!
//! ## 设计思路
//!
//! 签名采集端可能直接提交 Base64，也可能提交完整的 Data URL。
//! 这里统一剥离 `data:<mime>;base64,` 前缀，解码后再按字节数上限校验。
//!
//! ## 实现思路
//!
//! - 通过预编译正则识别 Data URL，命中则只取逗号后的 Base64 部分。
//! - 标准字母表解码，末尾 `=` 填充可有可无。
//! - 体积上限约束的是“解码后字节数”。解码前只用理论最小解码长度做快速拒绝，
//!   恰好等于上限的载荷不会被提前误杀。

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{SignatureConverter, SignatureError};

static DATA_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(.+?);base64,(.+)$").unwrap());

const STANDARD_LENIENT_PADDING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

impl SignatureConverter {
    /// 解码 Base64 / Data URL 载荷并校验解码后体积。
    ///
    /// # 示例
    /// ```rust
    /// use signature_convert::signature::SignatureConverter;
    ///
    /// let bytes = SignatureConverter::decode_payload("data:text/plain;base64,SGVsbG8=", 16)?;
    /// assert_eq!(bytes, b"Hello");
    /// # Ok::<(), signature_convert::signature::SignatureError>(())
    /// ```
    pub fn decode_payload(payload: &str, max_bytes: u64) -> Result<Vec<u8>, SignatureError> {
        let base64_data = Self::strip_data_url_prefix(payload.trim());

        let min_decoded_len = Self::min_decoded_len(base64_data);
        if min_decoded_len > max_bytes {
            return Err(SignatureError::InvalidPayload(format!(
                "载荷超过上限：至少 {} 字节（限制：{} 字节）",
                min_decoded_len, max_bytes
            )));
        }

        let decoded = STANDARD_LENIENT_PADDING
            .decode(base64_data)
            .map_err(|e| SignatureError::InvalidPayload(format!("Base64 解码失败：{}", e)))?;

        if decoded.len() as u64 > max_bytes {
            return Err(SignatureError::InvalidPayload(format!(
                "载荷超过上限：{} 字节（限制：{} 字节）",
                decoded.len(),
                max_bytes
            )));
        }

        Ok(decoded)
    }

    /// 命中 Data URL 时返回 Base64 部分，否则原样返回。
    fn strip_data_url_prefix(payload: &str) -> &str {
        DATA_URL_PATTERN
            .captures(payload)
            .and_then(|caps| caps.get(2))
            .map_or(payload, |m| m.as_str())
    }

    /// 合法 Base64 文本的最小解码长度（最多 2 个填充字符）。
    fn min_decoded_len(base64_data: &str) -> u64 {
        (base64_data.len() as u64).saturating_sub(2) * 3 / 4
    }
}
