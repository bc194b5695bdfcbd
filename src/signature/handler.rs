//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `SignatureConverter` 只负责流程编排与配置持有，不绑定任何传输层。
//! 处理链路固定为：
//! 1. 校验参数、填充默认值
//! 2. 归一化目标格式（不支持的格式在解码前就拒绝）
//! 3. 解码载荷
//! 4. 解码光栅
//! 5. 透明边裁剪（可选）
//! 6. 等比缩放（可选）
//! 7. 背景合成
//! 8. 编码
//! 9. 生成标识并组装结果
//!
//! 裁剪必须先于缩放，缩放必须先于合成：缩放后的 alpha 边缘已被插值模糊，
//! 先合成则会把不透明背景一起重采样。
//!
//! ## 实现思路
//!
//! - 配置在构建时校验一次，之后只读，实例可在多线程间共享引用。
//! - 每个阶段按值接收光栅并返回新光栅，上一代光栅随即释放，最多同时存活两代。
//! - 记录 `decode/raster/transform/encode/total` 阶段耗时，便于性能诊断。

use std::time::Instant;

use super::file_id::generate_file_id;
use super::{ConversionRequest, ConversionResult, SignatureConfig, SignatureError};

/// 签名图片转换器。
#[derive(Debug, Clone)]
pub struct SignatureConverter {
    pub(super) config: SignatureConfig,
}

impl SignatureConverter {
    /// 根据配置创建转换器。
    ///
    /// # 示例
    /// ```rust
    /// use signature_convert::signature::{SignatureConfig, SignatureConverter};
    ///
    /// let converter = SignatureConverter::new(SignatureConfig::default())?;
    /// assert_eq!(converter.config().max_payload_bytes, 2_000_000);
    /// # Ok::<(), signature_convert::signature::SignatureError>(())
    /// ```
    pub fn new(config: SignatureConfig) -> Result<Self, SignatureError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    /// 处理主入口：载荷 → 光栅 → 变换 → 编码 → 结果。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use signature_convert::signature::{ConversionRequest, SignatureConfig, SignatureConverter};
    ///
    /// let converter = SignatureConverter::new(SignatureConfig::default())?;
    /// let result = converter.convert(&ConversionRequest::new("image/png", png_base64))?;
    /// assert_eq!(result.content_type, "image/png");
    /// # Ok::<(), signature_convert::signature::SignatureError>(())
    /// ```
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, SignatureError> {
        let total_start = Instant::now();

        let options = request.options.resolve()?;
        let format = options.format;

        if let Some(metadata) = &request.metadata {
            log::debug!(
                "📝 签名元信息 - mime: {} 画布: {:?}x{:?} dpi: {:?} 笔画: {:?} 时长: {:?}ms",
                request.mime,
                metadata.width,
                metadata.height,
                metadata.dpi,
                metadata.stroke_count,
                metadata.duration_ms
            );
        }

        let decode_start = Instant::now();
        let bytes = Self::decode_payload(&request.payload, self.config.max_payload_bytes)?;
        let decode_elapsed = decode_start.elapsed();

        let raster_start = Instant::now();
        let mut raster = self.decode_raster(&bytes, &request.mime)?;
        drop(bytes);
        let (source_width, source_height) = (raster.width(), raster.height());
        let raster_elapsed = raster_start.elapsed();

        let transform_start = Instant::now();
        if options.trim_transparent {
            raster = Self::trim_transparent(raster);
        }
        raster = self.resize_to_fit(raster, options.target_width, options.target_height)?;
        raster = Self::composite_background(raster, &options.background_color, format)?;
        let transform_elapsed = transform_start.elapsed();

        let encode_start = Instant::now();
        let data = self.encode_raster(&raster, format)?;
        let encode_elapsed = encode_start.elapsed();

        let result = ConversionResult {
            file_id: generate_file_id(),
            format,
            content_type: format.content_type(),
            data,
            width: raster.width(),
            height: raster.height(),
        };

        log::info!(
            "✅ 签名转换完成 - id: {} 格式: {} 尺寸: {}x{} -> {}x{} 大小: {}B decode={}ms raster={}ms transform={}ms encode={}ms total={}ms",
            result.file_id,
            format,
            source_width,
            source_height,
            result.width,
            result.height,
            result.size_bytes(),
            decode_elapsed.as_millis(),
            raster_elapsed.as_millis(),
            transform_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(result)
    }
}
