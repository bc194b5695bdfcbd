//! # 传输层适配（薄封装）
//!
//! ## 设计思路
//!
//! HTTP / CLI 等外部入口只需要三件事：
//! - 把 JSON 请求体反序列化为 `SignatureRequestDto`，并做非空检查
//! - 把 `ConversionResult` 渲染为 `SignatureResponse`（只报告字节数，不回显图片）
//! - 把 `SignatureError` 渲染为带状态码的 `ApiError`
//!
//! 流水线逻辑一律不放在这里。

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ConversionOptions, ConversionRequest, ConversionResult, ErrorCode, SignatureConverter,
    SignatureError, SignatureMetadata,
};

/// 请求体中的转换参数。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureOptionsDto {
    pub output_format: Option<String>,
    pub background_color: Option<String>,
    pub trim_transparent: Option<bool>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl From<SignatureOptionsDto> for ConversionOptions {
    fn from(dto: SignatureOptionsDto) -> Self {
        Self {
            output_format: dto.output_format,
            background_color: dto.background_color,
            trim_transparent: dto.trim_transparent.unwrap_or(false),
            target_width: dto.width,
            target_height: dto.height,
        }
    }
}

/// 转换请求体。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequestDto {
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub data: String,
    pub metadata: Option<SignatureMetadata>,
    pub options: Option<SignatureOptionsDto>,
}

impl SignatureRequestDto {
    /// 非空检查后转换为核心请求模型。
    pub fn into_request(self) -> Result<ConversionRequest, SignatureError> {
        if self.mime.trim().is_empty() {
            return Err(SignatureError::InvalidPayload("mime 不能为空".to_string()));
        }
        if self.data.trim().is_empty() {
            return Err(SignatureError::InvalidPayload("data 不能为空".to_string()));
        }

        Ok(ConversionRequest {
            mime: self.mime,
            payload: self.data,
            metadata: self.metadata,
            options: self.options.map(Into::into).unwrap_or_default(),
        })
    }
}

/// 成功响应体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    pub file_id: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
}

impl From<&ConversionResult> for SignatureResponse {
    fn from(result: &ConversionResult) -> Self {
        Self {
            file_id: result.file_id.clone(),
            content_type: result.content_type.to_string(),
            size_bytes: result.size_bytes(),
            width: result.width,
            height: result.height,
        }
    }
}

/// 失败响应体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// RFC 3339 UTC 时间戳。
    pub timestamp: String,
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
}

impl From<&SignatureError> for ApiError {
    fn from(error: &SignatureError) -> Self {
        let code = error.code();
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: code.status_code(),
            code,
            message: error.message().to_string(),
        }
    }
}

impl From<SignatureError> for ApiError {
    fn from(error: SignatureError) -> Self {
        Self::from(&error)
    }
}

/// 传输层入口：请求体 → 响应体 + 转换产物。
///
/// 产物字节不放进响应体，由调用方自行决定如何交付。
pub fn convert_signature(
    converter: &SignatureConverter,
    dto: SignatureRequestDto,
) -> Result<(SignatureResponse, ConversionResult), ApiError> {
    let request = dto.into_request()?;

    let result = converter.convert(&request).map_err(|err| {
        log::warn!("⚠️ 签名转换失败 - code: {} message: {}", err.code(), err.message());
        ApiError::from(err)
    })?;

    Ok((SignatureResponse::from(&result), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::SignatureConfig;

    // 1x1 PNG
    const TINY_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    fn converter() -> SignatureConverter {
        SignatureConverter::new(SignatureConfig::default()).expect("converter init failed")
    }

    #[test]
    fn parses_camel_case_request_body() {
        let body = format!(
            r##"{{
                "mime": "image/png",
                "data": "data:image/png;base64,{}",
                "metadata": {{ "width": 400, "height": 200, "strokeCount": 3 }},
                "options": {{ "outputFormat": "jpeg", "backgroundColor": "#FFFFFF", "trimTransparent": true }}
            }}"##,
            TINY_PNG
        );

        let dto: SignatureRequestDto = serde_json::from_str(&body).expect("parse body");
        let request = dto.into_request().expect("valid request");

        assert_eq!(request.mime, "image/png");
        assert_eq!(request.metadata.as_ref().and_then(|m| m.stroke_count), Some(3));
        assert_eq!(request.options.output_format.as_deref(), Some("jpeg"));
        assert!(request.options.trim_transparent);
    }

    #[test]
    fn blank_mime_is_invalid_payload() {
        let dto = SignatureRequestDto {
            mime: " ".into(),
            data: TINY_PNG.into(),
            ..SignatureRequestDto::default()
        };

        let err = convert_signature(&converter(), dto).unwrap_err();

        assert_eq!(err.status, 400);
        assert_eq!(err.code, ErrorCode::InvalidPayload);
    }

    #[test]
    fn missing_data_is_invalid_payload() {
        let dto: SignatureRequestDto =
            serde_json::from_str(r#"{ "mime": "image/png" }"#).expect("parse body");

        let err = convert_signature(&converter(), dto).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidPayload);
    }

    #[test]
    fn png_to_jpeg_reports_size_and_dimensions() {
        let dto = SignatureRequestDto {
            mime: "image/png".into(),
            data: TINY_PNG.into(),
            options: Some(SignatureOptionsDto {
                output_format: Some("jpeg".into()),
                trim_transparent: Some(true),
                ..SignatureOptionsDto::default()
            }),
            ..SignatureRequestDto::default()
        };

        let (response, result) = convert_signature(&converter(), dto).expect("convert");

        assert_eq!(response.content_type, "image/jpeg");
        assert_eq!(response.size_bytes, result.data.len() as u64);
        assert_eq!((response.width, response.height), (1, 1));
        assert!(response.file_id.starts_with("sig_"));
    }

    #[test]
    fn unsupported_format_maps_to_415() {
        let dto = SignatureRequestDto {
            mime: "image/png".into(),
            data: TINY_PNG.into(),
            options: Some(SignatureOptionsDto {
                output_format: Some("gif".into()),
                ..SignatureOptionsDto::default()
            }),
            ..SignatureRequestDto::default()
        };

        let err = convert_signature(&converter(), dto).unwrap_err();

        assert_eq!(err.status, 415);
        assert_eq!(err.code, ErrorCode::UnsupportedFormat);
    }

    #[test]
    fn api_error_serializes_code_as_string() {
        let err = ApiError::from(SignatureError::InvalidOptions("背景色格式错误：#GGGGGG".into()));
        let json = serde_json::to_value(&err).expect("serialize");

        assert_eq!(json["status"], 400);
        assert_eq!(json["code"], "INVALID_OPTIONS");
        assert_eq!(json["message"], "背景色格式错误：#GGGGGG");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
