//! # 目标格式归一化
//!
//! 在解码图片之前先确定目标格式，不支持的格式尽早拒绝，避免白白解码。

use super::SignatureError;

/// 受支持的输出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// 归一化外部传入的格式字符串。
    ///
    /// - 忽略大小写与首尾空白
    /// - `png` → `Png`，`jpg` / `jpeg` → `Jpeg`
    /// - 缺省或空白 → `Png`
    ///
    /// # 示例
    /// ```rust
    /// use signature_convert::signature::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::normalize(Some("JPG"))?, OutputFormat::Jpeg);
    /// assert_eq!(OutputFormat::normalize(None)?, OutputFormat::Png);
    /// # Ok::<(), signature_convert::signature::SignatureError>(())
    /// ```
    pub fn normalize(format: Option<&str>) -> Result<Self, SignatureError> {
        let normalized = format.map(|f| f.trim().to_lowercase()).unwrap_or_default();

        match normalized.as_str() {
            "" | "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(SignatureError::UnsupportedFormat(format!(
                "输出格式 {} 不受支持（可选：png / jpeg）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// 目标格式是否必须完全不透明。
    pub fn requires_opaque(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_absent_default_to_png() {
        assert_eq!(OutputFormat::normalize(None).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::normalize(Some("")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::normalize(Some("   ")).unwrap(), OutputFormat::Png);
    }

    #[test]
    fn case_folds_known_formats() {
        assert_eq!(OutputFormat::normalize(Some("PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::normalize(Some("Jpg")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::normalize(Some("JPEG")).unwrap(), OutputFormat::Jpeg);
    }

    #[test]
    fn rejects_webp() {
        let result = OutputFormat::normalize(Some("webp"));
        assert!(matches!(result, Err(SignatureError::UnsupportedFormat(_))));
    }

    #[test]
    fn jpeg_metadata() {
        let format = OutputFormat::Jpeg;
        assert_eq!(format.content_type(), "image/jpeg");
        assert_eq!(format.extension(), "jpg");
        assert!(format.requires_opaque());
        assert!(!OutputFormat::Png.requires_opaque());
    }
}
