//! jvalidate - JSON VALIDATOR
//!
//! 표준 입력, 파일, 폴더 안의 JSON 파일들이 올바른 JSON 문법인지 검사하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🚀 **병렬 검사**: 고정 크기 워커 풀로 대량 파일 고속 검사
//! - 📂 **재귀 탐색**: 폴더 아래의 `*.json` 파일(대소문자 무시) 자동 수집
//! - 🔍 **패턴 확장**: `data/**/*.json` 같은 glob 패턴 지원
//! - 📜 **스트림 모드**: 연결된 여러 JSON 문서도 유효로 처리 (`--strict`로 단일 문서만)
//! - 📈 **요약 통계**: 유효/무효 수, 입력 용량, 검사 시간
//! - 📝 **에러 로그**: 모든 실패를 파일로 저장
//!
//! # 예제
//!
//! ```bash
//! # 표준 입력
//! cat data.json | jvalidate
//!
//! # 폴더 재귀 검사
//! jvalidate -r ./data
//!
//! # 단일 문서 모드
//! jvalidate --strict config.json
//! ```

pub mod checker;
pub mod cli;
pub mod error;
pub mod logger;
pub mod pattern;
pub mod pool;
pub mod report;
pub mod runner;
pub mod stats;
pub mod walk;

// Re-exports for convenient access
pub use checker::{
    Failure, SyntaxChecker, ValidateOptions, ValidationMode, ValidationResult, DEFAULT_WORKERS,
};
pub use cli::{Args, InputMode};
pub use error::{JValidateError, Result};
pub use pattern::{expand_pattern, looks_like_pattern};
pub use pool::{BatchReport, WorkerPool};
pub use report::{ConsoleReporter, Reporter};
pub use runner::{run, RunSummary};
pub use stats::{format_bytes, Statistics};
pub use walk::collect_json_files;
