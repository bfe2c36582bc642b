//! 통계 및 유틸리티 모듈
//!
//! 검사 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::checker::ValidationResult;

/// 검사 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 입력 수
    pub total_inputs: AtomicUsize,
    /// 유효 입력 수
    pub valid_count: AtomicUsize,
    /// 무효 또는 읽기 실패 입력 수
    pub invalid_count: AtomicUsize,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 검사 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 검사 결과 한 건 기록
    pub fn record(&self, result: &ValidationResult) {
        self.total_inputs.fetch_add(1, Ordering::Relaxed);
        match result {
            ValidationResult::Valid { file_size, .. } => {
                self.valid_count.fetch_add(1, Ordering::Relaxed);
                self.total_bytes_read
                    .fetch_add(*file_size, Ordering::Relaxed);
            }
            ValidationResult::Invalid(failure) => {
                self.invalid_count.fetch_add(1, Ordering::Relaxed);
                self.total_bytes_read
                    .fetch_add(failure.file_size, Ordering::Relaxed);
            }
        }
    }

    /// 총 입력 수 반환
    pub fn get_total(&self) -> usize {
        self.total_inputs.load(Ordering::Relaxed)
    }

    /// 유효 수 반환
    pub fn get_valid_count(&self) -> usize {
        self.valid_count.load(Ordering::Relaxed)
    }

    /// 무효 수 반환
    pub fn get_invalid_count(&self) -> usize {
        self.invalid_count.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 유효성 검사 통계 요약 출력
    pub fn print_validation_summary(&self) {
        let total = self.get_total();
        let valid = self.get_valid_count();
        let invalid = self.get_invalid_count();
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 🔍 유효성 검사 결과".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} 전체 입력:    {}", "📁".bright_cyan(), total);
        println!(
            "  {} 유효:         {}",
            "✅".bright_green(),
            valid.to_string().green()
        );

        if invalid > 0 {
            println!(
                "  {} 무효:         {}",
                "❌".bright_red(),
                invalid.to_string().red()
            );
        } else {
            println!("  {} 무효:         {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );

        if total > 0 {
            let valid_rate = (valid as f64 / total as f64) * 100.0;
            println!("  {} 유효율:       {:.1}%", "📈".bright_white(), valid_rate);
        }

        println!(
            "  {} 검사 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use jvalidate::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Failure;
    use crate::error::JValidateError;
    use std::path::PathBuf;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.000초");
        assert_eq!(format_duration(Duration::from_secs(65)), "1분 5초");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1시간 1분");
    }

    #[test]
    fn test_statistics_record() {
        let stats = Statistics::new();

        stats.record(&ValidationResult::Valid {
            input: PathBuf::from("a.json"),
            documents: 1,
            file_size: 1024,
        });
        stats.record(&ValidationResult::Invalid(Failure::new(
            "b.json",
            JValidateError::IsDirectory {
                path: PathBuf::from("b.json"),
            },
        )));
        stats.record(&ValidationResult::Invalid(
            Failure::new(
                "c.json",
                JValidateError::InvalidJson {
                    input: "c.json".to_string(),
                    line: 1,
                    column: 2,
                    reason: "expected value".to_string(),
                },
            )
            .with_file_size(512),
        ));

        assert_eq!(stats.get_total(), 3);
        assert_eq!(stats.get_valid_count(), 1);
        assert_eq!(stats.get_invalid_count(), 2);
        // 무효 파일도 읽은 크기에 포함
        assert_eq!(stats.total_bytes_read.load(Ordering::Relaxed), 1536);
    }
}
