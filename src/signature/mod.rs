//! # 签名图片转换模块（signature）
//!
//! ## 设计思路
//!
//! 签名采集端提交 Base64 / Data URL 形式的图片，这里输出规范化后的 PNG 或 JPEG：
//! 可选裁掉透明边、可选等比缩放，目标格式不支持透明时铺底色。
//! 按流水线阶段拆分子模块，每个阶段都是“光栅进、光栅出”的纯变换，不保留跨请求状态。
//!
//! - `payload`：Data URL 前缀剥离、Base64 解码、体积上限
//! - `codec`：图片解码（签名探测 + 像素上限）与编码
//! - `trim`：透明边裁剪
//! - `resize`：框内等比缩放
//! - `background`：背景色合成
//! - `file_id`：产物标识
//! - `handler`：编排整条流水线
//! - `transport`：请求/响应 DTO 与错误码到状态码映射（薄封装）
//! - `config/error/format/model`：配置、错误、目标格式、数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! 传输层（HTTP / CLI）
//!    ↓
//! transport.rs（DTO 校验 + 错误渲染）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ model.rs / format.rs（参数校验 + 目标格式归一化）
//!    ├─ payload.rs（Base64 解码 + 体积上限）
//!    ├─ codec.rs（解码）
//!    ├─ trim.rs → resize.rs → background.rs（变换，顺序固定）
//!    ├─ codec.rs（编码）
//!    └─ file_id.rs（生成标识）
//!    ↓
//! ConversionResult / SignatureError
//! ```
//!
//! ## 分层职责建议
//!
//! - 请求/响应字段变更优先改 `transport.rs`
//! - 阈值与默认值变更优先改 `config.rs`
//! - 阶段顺序变更只改 `handler.rs`
//! - 单阶段行为优化分别改 `payload/codec/trim/resize/background`

mod background;
mod codec;
mod config;
mod error;
mod file_id;
mod format;
mod handler;
mod model;
mod payload;
mod resize;
pub mod transport;
mod trim;

pub use config::SignatureConfig;
pub use error::{ErrorCode, SignatureError};
pub use file_id::{format_file_id, generate_file_id};
pub use format::OutputFormat;
pub use handler::SignatureConverter;
pub use model::{
    ConversionOptions, ConversionRequest, ConversionResult, ResolvedOptions, SignatureMetadata,
    DEFAULT_BACKGROUND_COLOR,
};
pub use transport::{
    ApiError, SignatureOptionsDto, SignatureRequestDto, SignatureResponse, convert_signature,
};
