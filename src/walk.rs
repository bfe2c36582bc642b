//! 폴더 탐색 모듈
//!
//! 루트 폴더 아래의 `.json` 파일(대소문자 무시)을 재귀적으로 수집합니다.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{JValidateError, Result};

/// 파일 이름이 `.json`으로 끝나는지 확인 (대소문자 무시)
pub fn has_json_suffix(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(".json"))
        .unwrap_or(false)
}

/// JSON 파일 수집
///
/// # Arguments
/// * `root` - 탐색 시작 폴더
/// * `max_depth` - 최대 탐색 깊이 (None이면 제한 없음, 1이면 루트 바로 아래까지)
///
/// # Returns
/// 탐색 순서대로 정렬된 파일 경로 목록. 루트에 접근할 수 없으면 `Traversal` 에러.
/// 하위 항목의 에러(권한 없음, 깨진 링크 등)는 건너뜁니다.
pub fn collect_json_files(root: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
    std::fs::metadata(root).map_err(|e| JValidateError::Traversal {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let walker = match max_depth {
        Some(depth) => WalkDir::new(root).max_depth(depth),
        None => WalkDir::new(root),
    };

    let mut files = Vec::new();
    for entry in walker.sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(JValidateError::Traversal {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                debug!("탐색 항목 건너뜀: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        if has_json_suffix(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(
        "{} 아래에서 JSON 파일 {}개 발견",
        root.display(),
        files.len()
    );
    Ok(files)
}
