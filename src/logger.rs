//! 로깅 설정 모듈
//!
//! `log` 매크로의 출력 대상(env_logger)을 초기화합니다. 프로세스 시작 시 한 번
//! `setup_logging`, 종료 직전에 `flush`를 호출합니다.

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// 로거 초기화
///
/// 의존 크레이트는 Warn, 이 크레이트는 Info(`debug`면 Debug) 수준으로 출력합니다.
/// `RUST_LOG` 환경 변수가 있으면 기본값 위에 적용됩니다.
pub fn setup_logging(debug: bool) {
    let env_filters = std::env::var("RUST_LOG").ok();
    let result = logger_builder(debug, env_filters.as_deref()).try_init();

    if let Err(e) = result {
        eprintln!("로거 초기화 실패: {}", e);
    }
}

/// 기본 필터 뒤에 환경 필터를 적용한 빌더 생성
fn logger_builder(debug: bool, env_filters: Option<&str>) -> Builder {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }

    builder.format(|buf, record| {
        let name = env!("CARGO_PKG_NAME");
        let line = match record.level() {
            Level::Error => format!("[{} {}] {}", name.cyan(), "ERROR".red(), record.args()),
            Level::Warn => format!("[{} {}] {}", name.cyan(), "WARN".yellow(), record.args()),
            Level::Debug | Level::Trace => format!(
                "[{} {} {}] {}",
                name.cyan(),
                "DEBUG".dimmed(),
                record.target().white(),
                record.args()
            ),
            Level::Info => format!("[{}] {}", name.cyan(), record.args()),
        };
        writeln!(buf, "{}", line)
    });
    builder
}

/// 버퍼에 남은 로그 출력
pub fn flush() {
    log::logger().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};

    fn enabled(debug: bool, env_filters: Option<&str>, target: &str, level: Level) -> bool {
        let logger = logger_builder(debug, env_filters).build();
        logger.matches(&Record::builder().target(target).level(level).build())
    }

    #[test]
    fn test_default_levels() {
        assert!(enabled(false, None, "jvalidate::pool", Level::Info));
        assert!(!enabled(false, None, "jvalidate::pool", Level::Debug));
        assert!(enabled(true, None, "jvalidate::pool", Level::Debug));
        assert!(!enabled(false, None, "rayon_core", Level::Info));
    }

    #[test]
    fn test_env_filters_override_defaults() {
        assert!(enabled(false, Some("debug"), "rayon_core", Level::Debug));
        assert!(enabled(false, Some("jvalidate=debug"), "jvalidate::pool", Level::Debug));
        assert!(!enabled(true, Some("jvalidate=error"), "jvalidate::pool", Level::Info));
    }
}
