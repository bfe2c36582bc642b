//! jvalidate - JSON VALIDATOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::error;
use std::io;
use std::process::ExitCode;

use jvalidate::{
    cli::Args,
    logger,
    report::{write_error_log, ConsoleReporter},
    runner,
};

fn main() -> ExitCode {
    let args = Args::parse();

    logger::setup_logging(args.debug);

    let code = match run_main(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    logger::flush();
    ExitCode::from(code)
}

/// 검사 실행 후 종료 코드 반환
fn run_main(args: &Args) -> Result<u8> {
    let reporter = ConsoleReporter::new(args.quiet);
    let summary = runner::run(args, io::stdin().lock(), &reporter);

    if summary.batch && !args.quiet {
        summary.stats.print_validation_summary();
    }

    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &summary.failures)
            .with_context(|| format!("에러 로그 저장 실패: {:?}", log_path))?;
        if !args.quiet {
            println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);
        }
    }

    Ok(summary.exit_code())
}
