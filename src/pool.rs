//! 워커 풀 모듈
//!
//! 파일 경로 목록을 고정 크기 워커 풀에 분배하여 병렬로 검사합니다.
//!
//! 흐름: 경로 전체를 작업 큐에 넣고 닫음 → W개 워커가 큐가 빌 때까지 꺼내 검사
//! → 결과 채널로 전달 → 모든 워커 종료 후 결과를 입력 순서대로 정렬.
//! 두 채널의 용량은 파일 수와 같아서 생산자와 워커가 서로를 기다리지 않습니다.

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;
use std::path::PathBuf;

use crate::checker::{Failure, SyntaxChecker, ValidateOptions, ValidationResult};
use crate::error::{JValidateError, Result};
use crate::report::Reporter;
use crate::stats::Statistics;

/// 작업 큐 항목 (입력 순서 + 경로)
struct WorkItem {
    index: usize,
    path: PathBuf,
}

/// 배치 검사 결과
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 검사한 파일 수
    pub total: usize,
    /// 유효한 파일 수
    pub valid: usize,
    /// 실패 목록 (입력 순서)
    pub failures: Vec<Failure>,
}

impl BatchReport {
    /// 실패가 없는지 확인
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 고정 크기 워커 풀
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
    checker: SyntaxChecker,
}

impl WorkerPool {
    /// 옵션으로부터 워커 풀 생성
    pub fn new(options: &ValidateOptions) -> Self {
        Self {
            workers: options.workers.max(1),
            checker: SyntaxChecker::from_options(options),
        }
    }

    /// 워커 수 반환
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 파일 목록 검사
    ///
    /// 최대 `workers`개의 검사가 동시에 실행되며, 모든 경로는 정확히 한 번 검사됩니다.
    /// 각 결과는 만들어지는 즉시 `reporter`로 전달되고 `stats`에 기록됩니다.
    ///
    /// # Returns
    /// 모든 실패를 입력 순서대로 담은 `BatchReport`. 스레드 풀을 만들 수 없으면 `ThreadPool` 에러.
    pub fn validate(
        &self,
        files: Vec<PathBuf>,
        reporter: &dyn Reporter,
        stats: &Statistics,
    ) -> Result<BatchReport> {
        let total = files.len();
        if total == 0 {
            debug!("검사할 파일 없음, 워커 풀 생략");
            return Ok(BatchReport::default());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("jvalidate-worker-{}", i))
            .build()
            .map_err(|e| JValidateError::ThreadPool {
                reason: e.to_string(),
            })?;

        let (work_tx, work_rx) = bounded::<WorkItem>(total);
        let (result_tx, result_rx) = bounded::<(usize, ValidationResult)>(total);

        for (index, path) in files.into_iter().enumerate() {
            work_tx
                .send(WorkItem { index, path })
                .map_err(|_| JValidateError::ThreadPool {
                    reason: "작업 큐가 닫혔습니다".to_string(),
                })?;
        }
        // 송신자를 닫아야 큐가 비었을 때 워커가 종료됨
        drop(work_tx);

        debug!("파일 {}개, 워커 {}개로 검사 시작", total, self.workers);
        reporter.batch_started(total);

        pool.scope(|scope| {
            for worker_id in 0..self.workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move |_| {
                    self.worker_loop(worker_id, work_rx, result_tx, reporter, stats)
                });
            }
        });
        drop(result_tx);

        reporter.batch_finished();

        let mut results: Vec<(usize, ValidationResult)> = result_rx.iter().collect();
        results.sort_by_key(|(index, _)| *index);

        let mut report = BatchReport {
            total,
            ..Default::default()
        };
        for (_, result) in results {
            match result {
                ValidationResult::Valid { .. } => report.valid += 1,
                ValidationResult::Invalid(failure) => report.failures.push(failure),
            }
        }

        debug!(
            "검사 완료: 전체 {}, 유효 {}, 실패 {}",
            report.total,
            report.valid,
            report.failures.len()
        );
        Ok(report)
    }

    /// 워커 하나: 큐가 닫히고 빌 때까지 경로를 꺼내 검사
    fn worker_loop(
        &self,
        worker_id: usize,
        work_rx: Receiver<WorkItem>,
        result_tx: Sender<(usize, ValidationResult)>,
        reporter: &dyn Reporter,
        stats: &Statistics,
    ) {
        while let Ok(WorkItem { index, path }) = work_rx.recv() {
            debug!("worker {}: 검사 {}", worker_id, path.display());
            let result = self.checker.validate_path(path);
            stats.record(&result);
            reporter.report(&result);
            if result_tx.send((index, result)).is_err() {
                break;
            }
        }
        debug!("worker {}: 종료", worker_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::DEFAULT_WORKERS;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// 동시 실행 수를 측정하는 보고 대상
    #[derive(Default)]
    struct ConcurrencyTracker {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        seen: Mutex<Vec<PathBuf>>,
    }

    impl Reporter for ConcurrencyTracker {
        fn report(&self, result: &ValidationResult) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            self.seen.lock().unwrap().push(result.input().to_path_buf());
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn write_files(dir: &TempDir, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.path().join(format!("file{:03}.json", i));
                fs::write(&path, format!(r#"{{"id": {}}}"#, i)).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_every_file_validated_once() {
        let temp_dir = TempDir::new().unwrap();
        let files = write_files(&temp_dir, 12);

        for workers in [1, 4, 12, 32] {
            let tracker = ConcurrencyTracker::default();
            let stats = Statistics::new();
            let pool = WorkerPool::new(&ValidateOptions::new().with_workers(workers));

            let report = pool.validate(files.clone(), &tracker, &stats).unwrap();

            let mut seen = tracker.seen.into_inner().unwrap();
            seen.sort();
            assert_eq!(seen, files, "workers = {workers}");
            assert_eq!(report.total, 12);
            assert_eq!(report.valid, 12);
            assert!(report.is_success());
            assert_eq!(stats.get_total(), 12);
        }
    }

    #[test]
    fn test_in_flight_never_exceeds_workers() {
        let temp_dir = TempDir::new().unwrap();
        let files = write_files(&temp_dir, 20);
        let tracker = ConcurrencyTracker::default();
        let pool = WorkerPool::new(&ValidateOptions::new().with_workers(3));

        pool.validate(files, &tracker, &Statistics::new()).unwrap();

        let max = tracker.max_in_flight.load(Ordering::SeqCst);
        assert!(max >= 1 && max <= 3, "max in flight = {max}");
    }

    #[test]
    fn test_all_failures_in_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut files = write_files(&temp_dir, 6);
        for i in [1, 4] {
            fs::write(&files[i], "{bad}").unwrap();
        }
        files.push(temp_dir.path().join("missing.json"));

        let pool = WorkerPool::new(&ValidateOptions::new().with_workers(4));
        let report = pool
            .validate(files.clone(), &ConcurrencyTracker::default(), &Statistics::new())
            .unwrap();

        let failed: Vec<&PathBuf> = report.failures.iter().map(|f| &f.input).collect();
        assert_eq!(failed, vec![&files[1], &files[4], &files[6]]);
        assert_eq!(report.valid, 4);
        assert!(matches!(
            report.failures[2].error,
            JValidateError::FileOpen { .. }
        ));
    }

    #[test]
    fn test_empty_list_short_circuits() {
        let tracker = ConcurrencyTracker::default();
        let report = WorkerPool::new(&ValidateOptions::new())
            .validate(Vec::new(), &tracker, &Statistics::new())
            .unwrap();

        assert_eq!(report.total, 0);
        assert!(report.is_success());
        assert!(tracker.seen.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_worker_count_is_at_least_one() {
        let mut options = ValidateOptions::new();
        assert_eq!(WorkerPool::new(&options).workers(), DEFAULT_WORKERS);

        options.workers = 0;
        assert_eq!(WorkerPool::new(&options).workers(), 1);
    }
}
