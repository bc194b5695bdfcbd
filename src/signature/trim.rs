//! # 透明边裁剪
//!
//! 逐像素扫描，求出所有 alpha 非 0 像素的最小外接矩形并裁剪。
//! 全透明图片找不到外接矩形，原样返回，裁剪永远不会产生 0 尺寸结果。

use image::{DynamicImage, GenericImageView};

use super::SignatureConverter;

/// 闭区间外接矩形 `[left, right] x [top, bottom]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) left: u32,
    pub(crate) top: u32,
    pub(crate) right: u32,
    pub(crate) bottom: u32,
}

impl Bounds {
    fn width(self) -> u32 {
        self.right - self.left + 1
    }

    fn height(self) -> u32 {
        self.bottom - self.top + 1
    }
}

impl SignatureConverter {
    /// 裁掉四周的全透明像素。
    ///
    /// 消耗输入光栅；无需裁剪时原样返回，否则返回裁剪后的新光栅。
    pub fn trim_transparent(raster: DynamicImage) -> DynamicImage {
        // 无 alpha 通道时每个像素都不透明，外接矩形即全图。
        if !raster.color().has_alpha() {
            return raster;
        }

        let Some(bounds) = Self::visible_bounds(&raster) else {
            log::debug!(
                "✂️ 图片全透明，跳过裁剪（{}x{}）",
                raster.width(),
                raster.height()
            );
            return raster;
        };

        if bounds.width() == raster.width() && bounds.height() == raster.height() {
            return raster;
        }

        log::debug!(
            "✂️ 透明边裁剪：{}x{} -> {}x{}（left={}, top={}）",
            raster.width(),
            raster.height(),
            bounds.width(),
            bounds.height(),
            bounds.left,
            bounds.top
        );

        raster.crop_imm(bounds.left, bounds.top, bounds.width(), bounds.height())
    }

    /// 所有 alpha 非 0 像素的外接矩形；没有可见像素时返回 `None`。
    pub(crate) fn visible_bounds(raster: &DynamicImage) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;

        for (x, y, pixel) in raster.pixels() {
            if pixel.0[3] == 0 {
                continue;
            }

            bounds = Some(match bounds {
                None => Bounds {
                    left: x,
                    top: y,
                    right: x,
                    bottom: y,
                },
                Some(b) => Bounds {
                    left: b.left.min(x),
                    top: b.top.min(y),
                    right: b.right.max(x),
                    bottom: b.bottom.max(y),
                },
            });
        }

        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn canvas_with_dots(width: u32, height: u32, dots: &[(u32, u32)]) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| {
            if dots.contains(&(x, y)) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 0])
            }
        }))
    }

    #[test]
    fn crops_to_inclusive_bounding_box() {
        let raster = canvas_with_dots(20, 10, &[(3, 2), (12, 7), (5, 4)]);

        let trimmed = SignatureConverter::trim_transparent(raster);

        assert_eq!(trimmed.dimensions(), (10, 6));
        let rgba = trimmed.to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0[3], 255);
        assert_eq!(rgba.get_pixel(9, 5).0[3], 255);
        assert_eq!(rgba.get_pixel(2, 2).0[3], 255);
    }

    #[test]
    fn single_visible_pixel_yields_one_by_one() {
        let raster = canvas_with_dots(9, 9, &[(4, 4)]);
        let trimmed = SignatureConverter::trim_transparent(raster);
        assert_eq!(trimmed.dimensions(), (1, 1));
    }

    #[test]
    fn fully_transparent_image_is_unchanged() {
        let raster = canvas_with_dots(10, 10, &[]);
        let trimmed = SignatureConverter::trim_transparent(raster);
        assert_eq!(trimmed.dimensions(), (10, 10));
    }

    #[test]
    fn faint_alpha_counts_as_visible() {
        let raster = DynamicImage::ImageRgba8(ImageBuffer::from_fn(6, 6, |x, y| {
            if (x, y) == (1, 1) || (x, y) == (4, 3) {
                Rgba([0, 0, 0, 1])
            } else {
                Rgba([0, 0, 0, 0])
            }
        }));
        let trimmed = SignatureConverter::trim_transparent(raster);
        assert_eq!(trimmed.dimensions(), (4, 3));
    }

    #[test]
    fn opaque_rgb_raster_is_untouched() {
        let raster = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(7, 5, Rgb([10, 20, 30])));
        let trimmed = SignatureConverter::trim_transparent(raster);
        assert_eq!(trimmed.dimensions(), (7, 5));
        assert!(!trimmed.color().has_alpha());
    }

    #[test]
    fn trimming_is_idempotent() {
        let canvas = canvas_with_dots(30, 30, &[(4, 9), (20, 11)]);
        let once = SignatureConverter::trim_transparent(canvas);
        let before = once.to_rgba8().into_raw();
        let dims = once.dimensions();

        let twice = SignatureConverter::trim_transparent(once);

        assert_eq!(twice.dimensions(), dims);
        assert_eq!(twice.to_rgba8().into_raw(), before);
    }
}
