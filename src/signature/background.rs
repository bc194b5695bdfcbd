//! # 背景合成模块
//!
//! ## 设计思路
//!
//! JPEG 不携带 alpha，输出前必须铺满背景色。PNG 只要光栅带 alpha 通道也统一铺底，
//! 不区分是否真的存在半透明像素；光栅本身没有 alpha 通道时直接返回。
//!
//! ## 实现思路
//!
//! - 背景色只在真正需要合成时才解析，格式错误报 `INVALID_OPTIONS`。
//! - 背景为不透明纯色，over 运算退化为 `src * a + bg * (1 - a)`，结果 alpha 恒为 255。
//! - JPEG 输出 RGB8，PNG 输出 RGBA8（alpha 全为 255）。

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

use super::{OutputFormat, SignatureConverter, SignatureError};

impl SignatureConverter {
    /// 按目标格式把光栅铺到背景色上，消耗输入光栅。
    pub fn composite_background(
        raster: DynamicImage,
        background_hex: &str,
        format: OutputFormat,
    ) -> Result<DynamicImage, SignatureError> {
        let needs_opaque = format.requires_opaque();
        if !needs_opaque && !raster.color().has_alpha() {
            log::debug!("🎨 光栅无 alpha 通道，跳过背景合成");
            return Ok(raster);
        }

        let background = Self::parse_background_color(background_hex)?;
        let rgba = raster.into_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!(
            "🎨 背景合成：{}x{} 背景={} 目标={}",
            width,
            height,
            background_hex.trim(),
            format
        );

        if needs_opaque {
            let flattened = ImageBuffer::from_fn(width, height, |x, y| {
                Rgb(Self::blend_over(rgba.get_pixel(x, y), background))
            });
            return Ok(DynamicImage::ImageRgb8(flattened));
        }

        let flattened = ImageBuffer::from_fn(width, height, |x, y| {
            let [r, g, b] = Self::blend_over(rgba.get_pixel(x, y), background);
            Rgba([r, g, b, 255])
        });
        Ok(DynamicImage::ImageRgba8(flattened))
    }

    /// 解析 `#RRGGBB` 背景色（允许首尾空白，不区分大小写）。
    ///
    /// # 示例
    /// ```rust
    /// use signature_convert::signature::SignatureConverter;
    ///
    /// assert_eq!(SignatureConverter::parse_background_color("#1a2B3c")?, [0x1A, 0x2B, 0x3C]);
    /// assert!(SignatureConverter::parse_background_color("#GGGGGG").is_err());
    /// # Ok::<(), signature_convert::signature::SignatureError>(())
    /// ```
    pub fn parse_background_color(hex: &str) -> Result<[u8; 3], SignatureError> {
        let invalid = || SignatureError::InvalidOptions(format!("背景色格式错误：{}", hex));

        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
    }

    fn blend_over(src: &Rgba<u8>, background: [u8; 3]) -> [u8; 3] {
        let alpha = src.0[3] as u32;
        let inv = 255 - alpha;
        let mix = |s: u8, b: u8| ((s as u32 * alpha + b as u32 * inv + 127) / 255) as u8;

        [
            mix(src.0[0], background[0]),
            mix(src.0[1], background[1]),
            mix(src.0[2], background[2]),
        ]
    }
}
