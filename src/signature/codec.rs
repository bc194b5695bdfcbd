//! # 光栅编解码模块
//!
//! ## 设计思路
//!
//! PNG / JPEG 位流编解码完全交给 `image` crate，这里只负责：
//! - 解码前的快速拒绝（文件签名探测、图片头尺寸检查）
//! - 把 `image` 的错误归类到稳定错误码
//!
//! ## 实现思路
//!
//! 1. `infer` 探测 magic bytes，识别为非图片类型直接拒绝
//! 2. 读取 header 尺寸，按像素上限快速拒绝
//! 3. 完整解码
//! 4. 编码时按目标格式选择编码器，PNG 编码器不接受的浮点色彩先降为 8 位

use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageReader};

use super::{OutputFormat, SignatureConverter, SignatureError};

impl SignatureConverter {
    /// 将图片字节解码为光栅。
    ///
    /// `declared_mime` 仅用于诊断日志，解码格式以文件内容为准。
    pub fn decode_raster(
        &self,
        bytes: &[u8],
        declared_mime: &str,
    ) -> Result<DynamicImage, SignatureError> {
        if bytes.is_empty() {
            return Err(SignatureError::InvalidPayload("图片内容为空".to_string()));
        }

        Self::probe_signature(bytes, declared_mime)?;

        let (header_width, header_height) = Self::inspect_dimensions(bytes)?;
        self.validate_pixel_limits(header_width, header_height)?;

        let raster = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| SignatureError::InvalidPayload(format!("无法识别图片格式：{}", e)))?
            .decode()
            .map_err(|e| SignatureError::InvalidPayload(format!("图片解码失败：{}", e)))?;

        if raster.width() == 0 || raster.height() == 0 {
            return Err(SignatureError::InvalidPayload("图片尺寸为 0".to_string()));
        }

        Ok(raster)
    }

    /// 将光栅编码为目标格式字节。
    pub fn encode_raster(
        &self,
        raster: &DynamicImage,
        format: OutputFormat,
    ) -> Result<Vec<u8>, SignatureError> {
        let mut buffer = Vec::new();

        let written = match format {
            OutputFormat::Png => {
                Self::normalize_for_png(raster).write_with_encoder(PngEncoder::new(&mut buffer))
            }
            OutputFormat::Jpeg => raster.write_with_encoder(JpegEncoder::new_with_quality(
                &mut buffer,
                self.config.jpeg_quality,
            )),
        };

        written.map_err(|e| Self::map_encode_error(e, format))?;

        if buffer.is_empty() {
            return Err(SignatureError::Internal(format!(
                "{} 编码结果为空",
                format
            )));
        }

        Ok(buffer)
    }

    /// 通过文件签名（magic bytes）排除明显不是图片的载荷。
    ///
    /// 无法识别的签名交给解码器最终判定。
    fn probe_signature(bytes: &[u8], declared_mime: &str) -> Result<(), SignatureError> {
        let Some(kind) = infer::get(bytes) else {
            log::debug!("🔍 文件签名未识别，交由解码器判定（声明 MIME：{}）", declared_mime);
            return Ok(());
        };

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(SignatureError::InvalidPayload(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        if !Self::mime_matches(declared_mime, kind.mime_type()) {
            log::debug!(
                "🔍 声明 MIME 与文件签名不一致 - 声明: {} 实际: {}",
                declared_mime,
                kind.mime_type()
            );
        }

        Ok(())
    }

    fn mime_matches(declared: &str, detected: &str) -> bool {
        let declared = declared.trim().to_ascii_lowercase();
        let declared = declared.split(';').next().unwrap_or_default().trim();
        declared == detected || (declared == "image/jpg" && detected == "image/jpeg")
    }

    /// 仅通过图片头信息读取宽高，用于完整解码前的像素限制检查。
    fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), SignatureError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| SignatureError::InvalidPayload(format!("无法识别图片格式：{}", e)))?
            .into_dimensions()
            .map_err(|e| SignatureError::InvalidPayload(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), SignatureError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| SignatureError::InvalidPayload("图片像素数溢出".to_string()))?;

        if pixels > self.config.max_decoded_pixels {
            return Err(SignatureError::InvalidPayload(format!(
                "图片像素过大：{}x{}（限制：{} 像素）",
                width, height, self.config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn normalize_for_png(raster: &DynamicImage) -> Cow<'_, DynamicImage> {
        match raster.color() {
            ColorType::Rgb32F => Cow::Owned(DynamicImage::ImageRgb8(raster.to_rgb8())),
            ColorType::Rgba32F => Cow::Owned(DynamicImage::ImageRgba8(raster.to_rgba8())),
            _ => Cow::Borrowed(raster),
        }
    }

    fn map_encode_error(error: image::ImageError, format: OutputFormat) -> SignatureError {
        match error {
            image::ImageError::Unsupported(e) => {
                SignatureError::UnsupportedFormat(format!("无法编码为 {}：{}", format, e))
            }
            other => SignatureError::Internal(format!("{} 编码失败：{}", format, other)),
        }
    }
}
