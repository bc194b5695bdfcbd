//! 产物落盘模块
//!
//! # 设计思路
//!
//! 转换流水线只返回内存中的字节，是否落盘由外围入口决定。
//! 这里负责把 `ConversionResult` 写到输出目录，文件名为 `<fileId>.<ext>`。
//!
//! # 实现思路
//!
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::signature::ConversionResult;

/// 产物文件名：`<fileId>.<ext>`。
pub fn artifact_file_name(result: &ConversionResult) -> String {
    format!("{}.{}", result.file_id, result.format.extension())
}

/// 将产物写入输出目录，返回写入的完整路径。
///
/// # 返回
/// - `Ok(PathBuf)`：写入的文件路径
/// - `Err(AppError::Storage)`：无法创建目录或目标不是目录
/// - `Err(AppError::Io)`：写入失败
pub fn save_artifact(output_dir: &Path, result: &ConversionResult) -> Result<PathBuf, AppError> {
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(AppError::Storage(format!(
            "'{}' 不是目录",
            output_dir.display()
        )));
    }

    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| {
            AppError::Storage(format!("创建输出目录 '{}' 失败: {}", output_dir.display(), e))
        })?;
    }

    let file_path = output_dir.join(artifact_file_name(result));
    fs::write(&file_path, &result.data)?;

    log::info!(
        "💾 产物已写入: {} ({} 字节)",
        file_path.display(),
        result.data.len()
    );

    Ok(file_path)
}
