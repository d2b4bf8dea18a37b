use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use app_lib::commands::analysis_cmd;
use app_lib::LaunchOptions;

#[derive(Parser, Debug)]
#[command(
    name = "keyword-insight",
    about = "네이버 키워드 데이터 분석: 트렌드, 블로그, 쇼핑 결과를 JSON 으로 출력",
    version,
    long_about = None
)]
struct Args {
    /// 분석할 키워드 (쉼표로 구분)
    #[arg(short, long, default_value = "카다이프, 피스타치오, 마시멜로우")]
    keywords: String,

    /// IQR 이상치 제거 없이 가격 분포 표시
    #[arg(long)]
    no_iqr: bool,

    /// 설정 파일
    #[arg(short, long, default_value = "keyword-insight.toml")]
    config: PathBuf,

    /// 배포용 시크릿 파일 (NAVER_CLIENT_ID / NAVER_CLIENT_SECRET)
    #[arg(short, long)]
    secrets: Option<PathBuf>,

    /// 상세 로그 출력
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let state = app_lib::setup(&LaunchOptions {
        settings_path: Some(args.config),
        secrets_path: args.secrets,
    })?;

    let status = analysis_cmd::credentials_status(&state);
    if let Some(message) = &status.message {
        log::error!("{}", message);
    }

    match analysis_cmd::run_analysis(&state, args.keywords, !args.no_iqr).await {
        Ok(report) => {
            for diag in &report.diagnostics {
                log::warn!("{}", diag.message());
            }
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
            Ok(())
        }
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}
