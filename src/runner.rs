//! 실행 모듈
//!
//! 인자로부터 입력 모드를 결정하고 표준 입력, 단일 파일, 폴더, 패턴 검사를
//! 호출한 뒤 결과를 모읍니다. 인자 하나의 실패는 다른 인자 처리를 막지 않습니다.

use log::{debug, info};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::checker::{Failure, SyntaxChecker, ValidateOptions, ValidationResult, STDIN_NAME};
use crate::cli::{Args, InputMode};
use crate::error::{JValidateError, Result};
use crate::pattern::{expand_pattern, looks_like_pattern};
use crate::pool::WorkerPool;
use crate::report::Reporter;
use crate::stats::Statistics;
use crate::walk::collect_json_files;

/// 전체 실행 결과
#[derive(Debug)]
pub struct RunSummary {
    /// 실행 통계
    pub stats: Statistics,
    /// 모든 실패 (인자 순서, 배치 안에서는 입력 순서)
    pub failures: Vec<Failure>,
    /// 폴더 또는 패턴 검사가 있었는지
    pub batch: bool,
}

impl RunSummary {
    /// 실패가 없는지 확인
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// 프로세스 종료 코드 (성공 0, 실패 1)
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// 인자에 따라 검사 실행
///
/// # Arguments
/// * `args` - 파싱된 CLI 인자
/// * `stdin` - 경로가 없을 때 검사할 입력 스트림
/// * `reporter` - 입력별 결과 보고 대상
pub fn run<R: Read>(args: &Args, stdin: R, reporter: &dyn Reporter) -> RunSummary {
    let mut runner = Runner::new(args.validate_options(), args.recursive, reporter);

    match args.input_mode() {
        InputMode::Stdin => {
            debug!("표준 입력 검사");
            runner.validate_reader(stdin);
        }
        InputMode::CurrentDir => {
            debug!("현재 폴더 재귀 검사");
            runner.validate_directory(Path::new("."));
        }
        InputMode::Paths => {
            for path in &args.paths {
                runner.validate_arg(path);
            }
        }
    }

    runner.finish()
}

struct Runner<'a> {
    options: ValidateOptions,
    checker: SyntaxChecker,
    recursive: bool,
    reporter: &'a dyn Reporter,
    stats: Statistics,
    failures: Vec<Failure>,
    batch: bool,
}

impl<'a> Runner<'a> {
    fn new(options: ValidateOptions, recursive: bool, reporter: &'a dyn Reporter) -> Self {
        Self {
            checker: SyntaxChecker::from_options(&options),
            options,
            recursive,
            reporter,
            stats: Statistics::new(),
            failures: Vec::new(),
            batch: false,
        }
    }

    fn finish(self) -> RunSummary {
        RunSummary {
            stats: self.stats,
            failures: self.failures,
            batch: self.batch,
        }
    }

    /// 경로 인자 하나 처리
    fn validate_arg(&mut self, arg: &Path) {
        match fs::metadata(arg) {
            Ok(meta) if meta.is_dir() => {
                if self.recursive {
                    self.validate_directory(arg);
                } else {
                    self.fail(arg, JValidateError::IsDirectory {
                        path: arg.to_path_buf(),
                    });
                }
            }
            Ok(_) => self.validate_file(arg.to_path_buf()),
            Err(e) => {
                let text = arg.to_string_lossy();
                if looks_like_pattern(&text) {
                    self.validate_pattern(&text);
                } else {
                    self.fail(arg, JValidateError::PathAccess {
                        path: arg.to_path_buf(),
                        source: e,
                    });
                }
            }
        }
    }

    fn validate_reader<R: Read>(&mut self, reader: R) {
        let result = self.checker.validate_reader(reader, STDIN_NAME);
        self.record(result);
    }

    fn validate_file(&mut self, path: PathBuf) {
        let result = self.checker.validate_path(path);
        self.record(result);
    }

    fn validate_directory(&mut self, root: &Path) {
        self.batch = true;
        let files = collect_json_files(root, self.options.max_depth);
        self.validate_batch(root, files);
    }

    fn validate_pattern(&mut self, pattern: &str) {
        self.batch = true;
        let files = expand_pattern(pattern);
        self.validate_batch(Path::new(pattern), files);
    }

    /// 수집된 파일 목록을 워커 풀로 검사
    fn validate_batch(&mut self, source: &Path, files: Result<Vec<PathBuf>>) {
        let files = match files {
            Ok(files) => files,
            Err(e) => return self.fail(source, e),
        };

        if files.is_empty() {
            info!("검사할 JSON 파일이 없습니다: {}", source.display());
            return;
        }

        let pool = WorkerPool::new(&self.options);
        debug!(
            "{}: 파일 {}개를 워커 {}개로 검사",
            source.display(),
            files.len(),
            pool.workers()
        );
        match pool.validate(files, self.reporter, &self.stats) {
            Ok(report) => self.failures.extend(report.failures),
            Err(e) => self.fail(source, e),
        }
    }

    fn record(&mut self, result: ValidationResult) {
        self.stats.record(&result);
        self.reporter.report(&result);
        if let ValidationResult::Invalid(failure) = result {
            self.failures.push(failure);
        }
    }

    /// 검사 전 단계의 실패 기록
    fn fail(&mut self, input: &Path, error: JValidateError) {
        debug!("실패 ({}): fatal={}", input.display(), error.is_fatal());
        self.record(ValidationResult::Invalid(Failure::new(input, error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(PathBuf, bool)>>);

    impl Reporter for Collect {
        fn report(&self, result: &ValidationResult) {
            self.0
                .lock()
                .unwrap()
                .push((result.input().to_path_buf(), result.is_valid()));
        }
    }

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("jvalidate").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_stdin_mode_reads_reader() {
        let reporter = Collect::default();
        let summary = run(&args(&[]), &b"[1,2,3]"[..], &reporter);

        assert_eq!(summary.exit_code(), 0);
        assert!(!summary.batch);
        assert_eq!(
            reporter.0.into_inner().unwrap(),
            vec![(PathBuf::from(STDIN_NAME), true)]
        );
    }

    #[test]
    fn test_paths_mode_ignores_stdin() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.json");
        fs::write(&path, "{}").unwrap();

        let reporter = Collect::default();
        let summary = run(
            &args(&[path.to_str().unwrap()]),
            &b"{broken"[..],
            &reporter,
        );

        assert!(summary.is_success());
        assert_eq!(summary.stats.get_total(), 1);
    }

    #[test]
    fn test_directory_without_recursive_fails() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = Collect::default();

        let summary = run(
            &args(&[temp_dir.path().to_str().unwrap()]),
            io::empty(),
            &reporter,
        );

        assert_eq!(summary.exit_code(), 1);
        assert!(matches!(
            summary.failures[0].error,
            JValidateError::IsDirectory { .. }
        ));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let reporter = Collect::default();
        let summary = run(&args(&["-r", "data/[oops"]), io::empty(), &reporter);

        assert_eq!(summary.exit_code(), 1);
        assert!(summary.batch);
        assert!(summary.failures[0].error.is_fatal());
    }
}
