//! # 签名图片规范化工具：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │          调用方（HTTP 服务 / main.rs 命令行）             │
//! │       SignatureRequestDto (JSON) ── ApiError (JSON)      │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ convert_signature / SignatureConverter::convert
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            核心 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (外围统一错误类型)              │
//! │  ├─ settings ─── 默认值 → JSON 文件 → 环境变量            │
//! │  ├─ storage ──── 产物落盘 <fileId>.<ext>                  │
//! │  │                                                       │
//! │  └─ signature ── 载荷解码 → 光栅解码 → 裁剪 → 缩放        │
//! │                  → 背景合成 → 编码 → 标识                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 外围统一错误类型 `AppError`，可渲染为 `ApiError` |
//! | [`settings`] | 转换配置的加载与校验 |
//! | [`storage`] | 转换产物写入输出目录 |
//! | [`signature`] | 转换流水线本体与传输层 DTO |

pub mod error;
pub mod settings;
pub mod signature;
pub mod storage;
