//! # 签名图片规范化工具：命令行入口
//!
//! 从标准输入读取一个 JSON 请求体，向标准输出写出 JSON 响应：
//!
//! ```text
//! signature-convert [输出目录] < request.json
//! ```
//!
//! - 成功：输出 `SignatureResponse`，退出码 0；给出输出目录时同时写入 `<fileId>.<ext>`
//! - 失败：输出 `ApiError`，退出码 1
//! - 配置文件路径取自环境变量 `SIGNATURE_CONFIG`

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use signature_convert::error::AppError;
use signature_convert::signature::{SignatureConverter, SignatureRequestDto, SignatureResponse};
use signature_convert::{settings, storage};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output_dir = std::env::args_os().nth(1).map(PathBuf::from);

    match run(output_dir) {
        Ok(response) => {
            print_json(&response);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("签名转换失败: {err}");
            print_json(&err.to_api_error());
            ExitCode::FAILURE
        }
    }
}

fn run(output_dir: Option<PathBuf>) -> Result<SignatureResponse, AppError> {
    let config_path = std::env::var_os(settings::CONFIG_PATH_ENV).map(PathBuf::from);
    let config = settings::load_config(config_path.as_deref())?;
    let converter = SignatureConverter::new(config)?;

    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;
    let dto: SignatureRequestDto =
        serde_json::from_str(&body).map_err(|e| AppError::Request(e.to_string()))?;

    let request = dto.into_request()?;
    let result = converter.convert(&request)?;

    if let Some(dir) = output_dir {
        storage::save_artifact(&dir, &result)?;
    }

    Ok(SignatureResponse::from(&result))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("序列化响应失败: {err}"),
    }
}
