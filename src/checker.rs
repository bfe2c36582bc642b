//! JSON 문법 검사 모듈
//!
//! 바이트 스트림(파일, 메모리 매핑, 표준 입력)이 JSON 값의 연속으로
//! 디코딩되는지 확인합니다.

use log::debug;
use memmap2::Mmap;
use serde::de::{Deserialize, IgnoredAny};
use serde_json::Deserializer;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{JValidateError, Result};

/// 기본 워커 수
pub const DEFAULT_WORKERS: usize = 10;

/// 대용량 파일 기본 임계값 (이상이면 메모리 매핑 사용)
pub const DEFAULT_MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

/// 표준 입력을 가리키는 입력 이름
pub const STDIN_NAME: &str = "<stdin>";

/// 검사 모드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// 0개 이상의 연속된 JSON 값을 허용 (`{"a":1}{"b":2}`, `truefalse`도 유효)
    #[default]
    Stream,
    /// 정확히 하나의 최상위 JSON 값만 허용
    Strict,
}

/// 검사 옵션
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// 동시 검사 워커 수 (최소 1)
    pub workers: usize,
    /// 검사 모드
    pub mode: ValidationMode,
    /// 최대 폴더 탐색 깊이
    pub max_depth: Option<usize>,
    /// 대용량 파일 임계값
    pub mmap_threshold: u64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidateOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            mode: ValidationMode::Stream,
            max_depth: None,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }

    /// 워커 수 설정 (0은 1로 보정)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// 검사 모드 설정
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// 최대 탐색 깊이 설정
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }
}

/// 입력 하나의 검사 결과
#[derive(Debug)]
pub enum ValidationResult {
    /// 유효한 입력
    Valid {
        input: PathBuf,
        /// 디코딩된 최상위 JSON 값 개수
        documents: usize,
        /// 원본 크기 (표준 입력은 0)
        file_size: u64,
    },
    /// 유효하지 않거나 읽을 수 없는 입력
    Invalid(Failure),
}

impl ValidationResult {
    /// 입력 경로 반환
    pub fn input(&self) -> &Path {
        match self {
            ValidationResult::Valid { input, .. } => input,
            ValidationResult::Invalid(failure) => &failure.input,
        }
    }

    /// 유효 여부
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }
}

/// 실패한 입력과 원인
#[derive(Debug)]
pub struct Failure {
    pub input: PathBuf,
    pub error: JValidateError,
    /// 실패한 파일의 크기 (알 수 없거나 표준 입력이면 0)
    pub file_size: u64,
}

impl Failure {
    pub fn new(input: impl Into<PathBuf>, error: JValidateError) -> Self {
        Self {
            input: input.into(),
            error,
            file_size: 0,
        }
    }

    /// 파일 크기 설정
    pub fn with_file_size(mut self, file_size: u64) -> Self {
        self.file_size = file_size;
        self
    }
}

/// 파일 검사 성공 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCheck {
    pub documents: usize,
    pub file_size: u64,
}

/// JSON 문법 검사기
#[derive(Debug, Clone, Copy)]
pub struct SyntaxChecker {
    mode: ValidationMode,
    mmap_threshold: u64,
}

impl Default for SyntaxChecker {
    fn default() -> Self {
        Self::new(ValidationMode::Stream)
    }
}

impl SyntaxChecker {
    /// 새 검사기 생성
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }

    /// 옵션으로부터 검사기 생성
    pub fn from_options(options: &ValidateOptions) -> Self {
        Self {
            mode: options.mode,
            mmap_threshold: options.mmap_threshold,
        }
    }

    /// 스트림 전체를 검사
    ///
    /// # Arguments
    /// * `reader` - 시작 위치에 있는 읽기 가능한 스트림
    /// * `input` - 에러 메시지에 사용할 입력 이름
    ///
    /// # Returns
    /// 디코딩된 JSON 값 개수 또는 첫 번째 디코딩 에러
    ///
    /// # Examples
    /// ```
    /// use jvalidate::checker::SyntaxChecker;
    ///
    /// let checker = SyntaxChecker::default();
    /// assert_eq!(checker.check_reader(&b"{\"a\":1}{\"b\":2}"[..], "doc").unwrap(), 2);
    /// assert!(checker.check_reader(&b"{\"a\":}"[..], "doc").is_err());
    /// ```
    pub fn check_reader<R: Read>(&self, reader: R, input: &str) -> Result<usize> {
        drain(Deserializer::from_reader(reader), self.mode)
            .map_err(|e| JValidateError::from_decode(input, e))
    }

    /// 메모리 상의 바이트를 검사
    pub fn check_slice(&self, bytes: &[u8], input: &str) -> Result<usize> {
        drain(Deserializer::from_slice(bytes), self.mode)
            .map_err(|e| JValidateError::from_decode(input, e))
    }

    /// 단일 JSON 파일 검사
    ///
    /// 파일 핸들은 이 함수가 소유하며 성공/실패와 관계없이 반환 시 닫힙니다.
    pub fn check_file(&self, path: &Path) -> Result<FileCheck> {
        let file = File::open(path).map_err(|e| JValidateError::FileOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        let name = path.display().to_string();

        let documents = if file_size >= self.mmap_threshold {
            // 대용량 파일: 메모리 매핑 사용
            debug!("메모리 매핑으로 검사: {} ({} bytes)", name, file_size);
            // 검사 중 파일이 외부에서 잘리면 매핑이 무효화될 수 있음
            let mmap = unsafe {
                Mmap::map(&file).map_err(|e| JValidateError::Read {
                    input: name.clone(),
                    reason: format!("메모리 매핑 실패: {}", e),
                })?
            };
            self.check_slice(&mmap, &name)?
        } else {
            self.check_reader(BufReader::new(file), &name)?
        };

        Ok(FileCheck {
            documents,
            file_size,
        })
    }

    /// 파일 검사 후 결과로 변환
    pub fn validate_path(&self, path: PathBuf) -> ValidationResult {
        match self.check_file(&path) {
            Ok(check) => ValidationResult::Valid {
                input: path,
                documents: check.documents,
                file_size: check.file_size,
            },
            Err(error) => {
                let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                ValidationResult::Invalid(Failure::new(path, error).with_file_size(file_size))
            }
        }
    }

    /// 리더(표준 입력 등) 검사 후 결과로 변환
    pub fn validate_reader<R: Read>(&self, reader: R, input: &str) -> ValidationResult {
        match self.check_reader(reader, input) {
            Ok(documents) => ValidationResult::Valid {
                input: PathBuf::from(input),
                documents,
                file_size: 0,
            },
            Err(error) => ValidationResult::Invalid(Failure::new(input, error)),
        }
    }
}

/// 입력 끝까지 JSON 값을 디코딩
fn drain<'de, R>(mut de: Deserializer<R>, mode: ValidationMode) -> serde_json::Result<usize>
where
    R: serde_json::de::Read<'de>,
{
    match mode {
        ValidationMode::Strict => {
            IgnoredAny::deserialize(&mut de)?;
            de.end()?;
            Ok(1)
        }
        ValidationMode::Stream => {
            // 값 사이 구분자를 요구하지 않음: `truefalse`, `1true`도 값 두 개
            let mut count = 0;
            loop {
                match de.end() {
                    Ok(()) => return Ok(count),
                    Err(e) if e.is_io() => return Err(e),
                    Err(_) => {}
                }
                IgnoredAny::deserialize(&mut de)?;
                count += 1;
            }
        }
    }
}
