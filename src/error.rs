//! 에러 타입 정의 모듈
//!
//! jvalidate에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// jvalidate에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum JValidateError {
    /// 경로가 존재하지 않거나 stat 불가
    #[error("경로에 접근할 수 없습니다 ({path}): {source}")]
    PathAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `-r` 없이 폴더가 주어짐
    #[error("폴더입니다 ({path}): -r 옵션으로 재귀 검사하세요")]
    IsDirectory { path: PathBuf },

    /// 재귀 탐색의 루트에 접근 불가
    #[error("폴더 탐색 실패 ({path}): {reason}")]
    Traversal { path: PathBuf, reason: String },

    /// 글로브 문법 오류
    #[error("유효하지 않은 패턴 ({pattern}): {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// JSON 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({path}): {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 읽기 도중 I/O 실패
    #[error("입력을 읽을 수 없습니다 ({input}): {reason}")]
    Read { input: String, reason: String },

    /// JSON 문법 오류
    #[error("유효하지 않은 JSON ({input}): {reason}")]
    InvalidJson {
        input: String,
        line: usize,
        column: usize,
        reason: String,
    },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPool { reason: String },

    /// 에러 로그 파일 작성 실패
    #[error("에러 로그 작성 실패 ({path}): {reason}")]
    ErrorLog { path: PathBuf, reason: String },
}

impl JValidateError {
    /// serde_json 디코딩 에러를 입력 이름과 함께 변환
    ///
    /// I/O 에러는 `Read`로, 나머지(문법, 데이터, EOF)는 `InvalidJson`으로 분류합니다.
    pub fn from_decode(input: &str, err: serde_json::Error) -> Self {
        if err.is_io() {
            JValidateError::Read {
                input: input.to_string(),
                reason: err.to_string(),
            }
        } else {
            JValidateError::InvalidJson {
                input: input.to_string(),
                line: err.line(),
                column: err.column(),
                reason: err.to_string(),
            }
        }
    }

    /// 실행 전체(해당 인자)를 중단시키는 에러인지 확인
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            JValidateError::Traversal { .. }
                | JValidateError::InvalidPattern { .. }
                | JValidateError::ThreadPool { .. }
        )
    }
}

/// jvalidate 결과 타입 별칭
pub type Result<T> = std::result::Result<T, JValidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decode_syntax_error() {
        let err = serde_json::from_str::<serde_json::Value>("{\"a\":}").unwrap_err();
        let converted = JValidateError::from_decode("test.json", err);

        match converted {
            JValidateError::InvalidJson {
                input, line, column, ..
            } => {
                assert_eq!(input, "test.json");
                assert_eq!(line, 1);
                assert!(column >= 5, "column = {column}");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_is_fatal() {
        let fatal = JValidateError::InvalidPattern {
            pattern: "[".to_string(),
            reason: "unclosed".to_string(),
        };
        let local = JValidateError::IsDirectory {
            path: PathBuf::from("data"),
        };

        assert!(fatal.is_fatal());
        assert!(!local.is_fatal());
    }
}
