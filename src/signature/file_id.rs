//! # 产物标识生成
//!
//! 格式：`sig_<UTC yyyyMMddHHmmss>_<8 位十六进制随机后缀>`。
//! 时间戳保证可按时间排序，随机后缀保证同一秒内并发生成也不冲突。

use chrono::{DateTime, Utc};
use uuid::Uuid;

const FILE_ID_PREFIX: &str = "sig";
const FILE_ID_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const FILE_ID_SUFFIX_LEN: usize = 8;

/// 以当前 UTC 时间和随机 UUID 生成标识。
pub fn generate_file_id() -> String {
    format_file_id(Utc::now(), Uuid::new_v4())
}

/// 纯函数版本：时间与随机源都由调用方传入。
pub fn format_file_id(now: DateTime<Utc>, random: Uuid) -> String {
    let simple = random.simple().to_string();
    format!(
        "{}_{}_{}",
        FILE_ID_PREFIX,
        now.format(FILE_ID_TIMESTAMP_FORMAT),
        &simple[..FILE_ID_SUFFIX_LEN]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn formats_timestamp_and_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let random = Uuid::parse_str("0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d").unwrap();

        assert_eq!(format_file_id(now, random), "sig_20240309070501_0a1b2c3d");
    }

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = generate_file_id();
        let parts: Vec<&str> = id.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "sig");
        assert_eq!(parts[1].len(), 14);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn ids_generated_in_the_same_second_are_unique() {
        let ids: HashSet<String> = (0..200).map(|_| generate_file_id()).collect();
        assert_eq!(ids.len(), 200);
    }
}
