//! # 请求与结果模型
//!
//! ## 设计思路
//!
//! 将“调用方输入”和“流水线输出”解耦：
//! - `ConversionRequest` 表示一次转换请求（载荷 + 可选参数）
//! - `ResolvedOptions` 表示填充默认值并校验后的参数
//! - `ConversionResult` 表示编码完成的最终产物
//!
//! 所有模型都按次创建，不跨请求共享。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{OutputFormat, SignatureError};

/// 默认背景色。
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";

/// 签名采集端上报的元信息。
///
/// 流水线从不读取这些字段，仅用于日志与遥测。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub dpi: Option<u32>,
    pub stroke_count: Option<u32>,
    pub duration_ms: Option<u64>,
}

/// 转换参数（未填充默认值）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// 目标格式，缺省为 png。
    pub output_format: Option<String>,
    /// `#RRGGBB` 背景色，缺省为 `#FFFFFF`。
    pub background_color: Option<String>,
    /// 是否裁掉四周的全透明像素。
    pub trim_transparent: bool,
    pub target_width: Option<i64>,
    pub target_height: Option<i64>,
}

/// 填充默认值并通过校验的参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub format: OutputFormat,
    pub background_color: String,
    pub trim_transparent: bool,
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
}

impl ConversionOptions {
    /// 校验并填充默认值。
    ///
    /// 顺序固定：先校验宽高（`INVALID_OPTIONS`），再归一化格式（`UNSUPPORTED_FORMAT`）。
    pub fn resolve(&self) -> Result<ResolvedOptions, SignatureError> {
        let target_width = Self::validate_dimension("width", self.target_width)?;
        let target_height = Self::validate_dimension("height", self.target_height)?;
        let format = OutputFormat::normalize(self.output_format.as_deref())?;

        let background_color = match self.background_color.as_deref().map(str::trim) {
            Some(color) if !color.is_empty() => color.to_string(),
            _ => DEFAULT_BACKGROUND_COLOR.to_string(),
        };

        Ok(ResolvedOptions {
            format,
            background_color,
            trim_transparent: self.trim_transparent,
            target_width,
            target_height,
        })
    }

    fn validate_dimension(name: &str, value: Option<i64>) -> Result<Option<u32>, SignatureError> {
        let Some(value) = value else {
            return Ok(None);
        };

        if value <= 0 {
            return Err(SignatureError::InvalidOptions(format!(
                "{} 必须为正整数（当前：{}）",
                name, value
            )));
        }

        u32::try_from(value).map(Some).map_err(|_| {
            SignatureError::InvalidOptions(format!("{} 超出允许范围（当前：{}）", name, value))
        })
    }
}

/// 一次转换请求。
#[derive(Clone)]
pub struct ConversionRequest {
    /// 调用方声明的 MIME，仅作参考，不参与解码判定。
    pub mime: String,
    /// 纯 Base64 或 `data:<mime>;base64,<...>` 形式的载荷。
    pub payload: String,
    pub metadata: Option<SignatureMetadata>,
    pub options: ConversionOptions,
}

impl ConversionRequest {
    pub fn new(mime: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            payload: payload.into(),
            metadata: None,
            options: ConversionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_metadata(mut self, metadata: SignatureMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// 载荷可能有数 MB，调试输出只保留长度。
impl fmt::Debug for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRequest")
            .field("mime", &self.mime)
            .field("payload_len", &self.payload.len())
            .field("metadata", &self.metadata)
            .field("options", &self.options)
            .finish()
    }
}

/// 转换产物。
#[derive(Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub file_id: String,
    pub format: OutputFormat,
    pub content_type: &'static str,
    /// 编码后的图片字节，所有权交给调用方。
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ConversionResult {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionResult")
            .field("file_id", &self.file_id)
            .field("content_type", &self.content_type)
            .field("data_len", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_defaults() {
        let resolved = ConversionOptions::default().resolve().expect("resolve defaults");

        assert_eq!(resolved.format, OutputFormat::Png);
        assert_eq!(resolved.background_color, DEFAULT_BACKGROUND_COLOR);
        assert!(!resolved.trim_transparent);
        assert_eq!(resolved.target_width, None);
        assert_eq!(resolved.target_height, None);
    }

    #[test]
    fn blank_background_falls_back_to_white() {
        let options = ConversionOptions {
            background_color: Some("  ".into()),
            ..ConversionOptions::default()
        };
        assert_eq!(options.resolve().unwrap().background_color, "#FFFFFF");
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        for (width, height) in [(Some(0), None), (None, Some(-3)), (Some(-1), Some(10))] {
            let options = ConversionOptions {
                target_width: width,
                target_height: height,
                ..ConversionOptions::default()
            };
            assert!(matches!(options.resolve(), Err(SignatureError::InvalidOptions(_))));
        }
    }

    #[test]
    fn dimension_check_runs_before_format_check() {
        let options = ConversionOptions {
            output_format: Some("webp".into()),
            target_width: Some(0),
            ..ConversionOptions::default()
        };
        assert!(matches!(options.resolve(), Err(SignatureError::InvalidOptions(_))));
    }

    #[test]
    fn debug_output_hides_payload() {
        let request = ConversionRequest::new("image/png", "A".repeat(64));
        let rendered = format!("{:?}", request);
        assert!(rendered.contains("payload_len: 64"));
        assert!(!rendered.contains("AAAA"));
    }
}
