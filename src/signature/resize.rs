//! # 等比缩放模块
//!
//! ## 设计思路
//!
//! 签名笔迹对插值质量敏感，不允许最近邻采样。
//! 这里统一使用 Catmull-Rom（双三次）卷积，由 `fast_image_resize` 执行，
//! 卷积核随缩放比例展开，缩小时自带抗锯齿。
//!
//! ## 实现思路
//!
//! 1. `fit_dimensions` 纯计算目标尺寸（框内等比 / 单边等比）
//! 2. 尺寸不变则直接返回，避免无谓的重采样与画质损失
//! 3. 目标像素数超过 `max_decoded_pixels` 时拒绝（`INVALID_OPTIONS`），不分配输出
//! 4. `fast_image_resize` 失败时回退 `image::resize_exact`（同一滤镜）

use fast_image_resize as fr;
use image::DynamicImage;
use image::imageops::FilterType;

use super::{SignatureConverter, SignatureError};

impl SignatureConverter {
    /// 计算等比缩放后的目标尺寸。
    ///
    /// - 宽高都给出：取两边比例的较小值，结果落在框内
    /// - 只给宽：高按原始宽高比换算
    /// - 只给高：宽按原始宽高比换算
    /// - 都未给出：返回原尺寸
    ///
    /// 舍入为四舍五入（远离零），结果至少为 1。
    ///
    /// # 示例
    /// ```rust
    /// use signature_convert::signature::SignatureConverter;
    ///
    /// assert_eq!(SignatureConverter::fit_dimensions(400, 200, Some(100), None), (100, 50));
    /// assert_eq!(SignatureConverter::fit_dimensions(400, 200, Some(100), Some(100)), (100, 50));
    /// ```
    pub fn fit_dimensions(
        original_width: u32,
        original_height: u32,
        target_width: Option<u32>,
        target_height: Option<u32>,
    ) -> (u32, u32) {
        let ow = original_width as f64;
        let oh = original_height as f64;
        let aspect_ratio = ow / oh;

        let (width, height) = match (target_width, target_height) {
            (None, None) => return (original_width, original_height),
            (Some(tw), Some(th)) => {
                let ratio = (tw as f64 / ow).min(th as f64 / oh);
                (Self::round_dimension(ow * ratio), Self::round_dimension(oh * ratio))
            }
            (Some(tw), None) => (tw, Self::round_dimension(tw as f64 / aspect_ratio)),
            (None, Some(th)) => (Self::round_dimension(th as f64 * aspect_ratio), th),
        };

        (width.max(1), height.max(1))
    }

    fn round_dimension(value: f64) -> u32 {
        value.round().clamp(0.0, u32::MAX as f64) as u32
    }

    /// 按目标宽高等比缩放，消耗输入光栅。
    ///
    /// 换算后的目标像素数同样受 `max_decoded_pixels` 约束，超限时在分配输出前拒绝。
    pub fn resize_to_fit(
        &self,
        raster: DynamicImage,
        target_width: Option<u32>,
        target_height: Option<u32>,
    ) -> Result<DynamicImage, SignatureError> {
        let (width, height) = (raster.width(), raster.height());
        let (new_width, new_height) =
            Self::fit_dimensions(width, height, target_width, target_height);

        if new_width == width && new_height == height {
            return Ok(raster);
        }

        self.validate_target_pixels(new_width, new_height)?;

        log::debug!(
            "📐 等比缩放：{}x{} -> {}x{}（请求：{:?}x{:?}）",
            width,
            height,
            new_width,
            new_height,
            target_width,
            target_height
        );

        let resized = match Self::resample_with_fast_image_resize(&raster, new_width, new_height) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                    err
                );
                raster.resize_exact(new_width, new_height, FilterType::CatmullRom)
            }
        };

        Ok(resized)
    }

    fn validate_target_pixels(&self, width: u32, height: u32) -> Result<(), SignatureError> {
        let limit = self.config.max_decoded_pixels;
        let within_limit = (width as u64)
            .checked_mul(height as u64)
            .is_some_and(|pixels| pixels <= limit);

        if !within_limit {
            return Err(SignatureError::InvalidOptions(format!(
                "目标尺寸过大：{}x{}（限制：{} 像素）",
                width, height, limit
            )));
        }

        Ok(())
    }

    /// 保持源色彩类型的卷积重采样（含 alpha 预乘处理）。
    fn resample_with_fast_image_resize(
        raster: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, fr::ResizeError> {
        let mut resized = DynamicImage::new(width, height, raster.color());

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom));

        resizer.resize(raster, &mut resized, Some(&options))?;

        Ok(resized)
    }
}
