//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::checker::{ValidateOptions, ValidationMode, DEFAULT_WORKERS};

/// 입력 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// 표준 입력을 하나의 JSON 스트림으로 검사
    Stdin,
    /// 인자로 주어진 경로 검사
    Paths,
    /// 경로 없이 `-r`: 현재 폴더를 재귀 검사
    CurrentDir,
}

/// jvalidate CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "jvalidate",
    author = "YourName <your@email.com>",
    version,
    disable_version_flag = true,
    about = "JSON VALIDATOR - 표준 입력, 파일, 폴더의 JSON 문법을 검사하는 CLI 도구",
    long_about = r#"
JSON VALIDATOR
==============

표준 입력, 파일, 또는 폴더 안의 JSON 파일들이
올바른 JSON 문법인지 검사합니다.

하나라도 유효하지 않거나 읽을 수 없으면 종료 코드 1을 반환합니다.
기본 모드에서는 공백으로 구분된 여러 JSON 값(`{"a":1}{"b":2}`)도 유효합니다.
단일 문서만 허용하려면 --strict 를 사용하세요.

예제:
  jvalidate test.json
  cat test.json | jvalidate
  jvalidate -r ./data
  jvalidate -r 'data/**/*.json'
  jvalidate -r ./data -j 32 --log errors.log
"#
)]
pub struct Args {
    /// 검사할 파일, 폴더(-r) 또는 glob 패턴. 없으면 표준 입력을 검사
    pub paths: Vec<PathBuf>,

    /// 폴더 안의 *.json 파일을 재귀적으로 검사
    #[arg(short, long)]
    pub recursive: bool,

    /// 디버그 로그 출력
    #[arg(short, long)]
    pub debug: bool,

    /// 병렬 검사 워커 수
    #[arg(short = 'j', long, default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// 단일 JSON 문서만 허용 (연결된 여러 문서와 빈 입력은 무효)
    #[arg(long)]
    pub strict: bool,

    /// 실패만 출력 (진행률 바와 요약 생략)
    #[arg(short, long)]
    pub quiet: bool,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 버전 출력
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: (),
}

impl Args {
    /// 입력 모드 결정
    pub fn input_mode(&self) -> InputMode {
        match (self.paths.is_empty(), self.recursive) {
            (true, false) => InputMode::Stdin,
            (true, true) => InputMode::CurrentDir,
            (false, _) => InputMode::Paths,
        }
    }

    /// 검사 옵션 생성
    pub fn validate_options(&self) -> ValidateOptions {
        let mode = if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Stream
        };

        ValidateOptions::new()
            .with_workers(self.workers)
            .with_mode(mode)
            .with_max_depth(self.max_depth)
    }
}

/// 워커 수 파싱 (1 이상)
fn parse_workers(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("워커 수는 1 이상이어야 합니다".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("숫자가 아닙니다: {}", e)),
    }
}
