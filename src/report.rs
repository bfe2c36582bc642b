//! 결과 보고 모듈
//!
//! 입력별 검사 결과를 받는 보고 대상(`Reporter`)과 터미널 구현을 정의합니다.
//! 워커 스레드에서 동시에 호출되므로 구현은 `Sync`여야 합니다.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use crate::checker::{Failure, ValidationResult};
use crate::error::{JValidateError, Result};

/// 검사 결과 보고 대상
pub trait Reporter: Sync {
    /// 배치 검사 시작 (파일 수 전달)
    fn batch_started(&self, _total: usize) {}

    /// 입력 하나의 결과. 결과가 만들어지는 즉시 호출됩니다.
    fn report(&self, result: &ValidationResult);

    /// 배치 검사 종료
    fn batch_finished(&self) {}
}

/// 터미널 출력 보고 대상
pub struct ConsoleReporter {
    quiet: bool,
    progress: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    /// 새 보고 대상 생성
    ///
    /// # Arguments
    /// * `quiet` - true면 실패만 출력하고 진행률 바를 표시하지 않음
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            progress: Mutex::new(None),
        }
    }

    /// 진행률 바를 잠시 숨기고 출력
    fn print(&self, line: String, to_stderr: bool) {
        let emit = || {
            if to_stderr {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        };

        let progress = self.progress.lock().ok().and_then(|guard| guard.as_ref().cloned());
        match progress {
            Some(pb) => pb.suspend(emit),
            None => emit(),
        }
    }

    fn tick(&self) {
        if let Ok(guard) = self.progress.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.inc(1);
            }
        }
    }
}

impl Reporter for ConsoleReporter {
    fn batch_started(&self, total: usize) {
        if self.quiet {
            return;
        }
        if let Ok(mut guard) = self.progress.lock() {
            *guard = Some(create_progress_bar(total));
        }
    }

    fn report(&self, result: &ValidationResult) {
        match result {
            ValidationResult::Valid { input, .. } => {
                if !self.quiet {
                    self.print(format!("  {} {}", "✓".green(), input.display()), false);
                }
            }
            ValidationResult::Invalid(failure) => {
                self.print(format_failure(failure), true);
            }
        }
        self.tick();
    }

    fn batch_finished(&self) {
        if let Ok(mut guard) = self.progress.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

/// 실패 한 건을 출력용 문자열로 변환
pub fn format_failure(failure: &Failure) -> String {
    format!(
        "  {} {}\n    {}",
        "✗".red(),
        failure.input.display().to_string().red(),
        failure.error.to_string().dimmed()
    )
}

/// 에러 로그 파일 작성
///
/// # Arguments
/// * `log_path` - 생성할 로그 파일 경로 (기존 파일은 덮어씀)
/// * `failures` - 기록할 실패 목록
pub fn write_error_log(log_path: &Path, failures: &[Failure]) -> Result<()> {
    write_error_log_inner(log_path, failures).map_err(|e| JValidateError::ErrorLog {
        path: log_path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn write_error_log_inner(log_path: &Path, failures: &[Failure]) -> std::io::Result<()> {
    let mut log_file = BufWriter::new(File::create(log_path)?);

    writeln!(log_file, "jvalidate 에러 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_timestamp())?;
    writeln!(log_file, "총 에러 수: {}", failures.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for failure in failures {
        writeln!(log_file, "\n파일: {}", failure.input.display())?;
        writeln!(log_file, "에러: {}", failure.error)?;
    }

    log_file.flush()
}

/// 현재 시간 문자열 반환
fn unix_timestamp() -> String {
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}

/// 진행률 바 생성 (stderr, 터미널이 아니면 자동으로 숨김)
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}
