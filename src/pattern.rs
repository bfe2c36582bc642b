//! 패턴 확장 모듈
//!
//! 셸 형식의 glob 패턴을 실제 파일 경로 목록으로 확장합니다.

use glob::MatchOptions;
use log::debug;
use std::path::PathBuf;

use crate::error::{JValidateError, Result};

/// glob 메타 문자
const GLOB_META: [char; 3] = ['*', '?', '['];

/// 인자가 glob 패턴처럼 보이는지 확인
///
/// # Examples
/// ```
/// use jvalidate::pattern::looks_like_pattern;
///
/// assert!(looks_like_pattern("data/*.json"));
/// assert!(looks_like_pattern("file[0-9].json"));
/// assert!(!looks_like_pattern("plain.json"));
/// ```
pub fn looks_like_pattern(arg: &str) -> bool {
    arg.contains(GLOB_META)
}

/// glob 패턴 확장
///
/// # Arguments
/// * `pattern` - 글로브 패턴 문자열 (`**` 지원)
///
/// # Returns
/// 일치하는 파일 경로 목록 (일치 없음은 빈 목록). 패턴 문법이 잘못되면 `InvalidPattern` 에러.
/// 읽을 수 없는 항목과 폴더는 건너뜁니다.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let paths = glob::glob_with(pattern, options).map_err(|e| JValidateError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_dir() => debug!("폴더 건너뜀: {}", path.display()),
            Ok(path) => files.push(path),
            Err(e) => debug!("패턴 항목 건너뜀: {}", e),
        }
    }

    debug!("패턴 {} -> 파일 {}개", pattern, files.len());
    Ok(files)
}
