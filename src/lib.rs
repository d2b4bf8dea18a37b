pub mod models;
pub mod services;
pub mod commands;
pub mod config;
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Mutex;

use config::credentials::CredentialResolver;
use models::settings::AppSettings;
use services::dashboard::DashboardSession;

pub struct AppState {
    pub session: DashboardSession,
    pub last_keywords: Mutex<Vec<String>>,
}

impl AppState {
    pub fn new(session: DashboardSession) -> Self {
        Self {
            session,
            last_keywords: Mutex::new(Vec::new()),
        }
    }
}

/// 실행 파일이 넘겨주는 시작 옵션
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub settings_path: Option<PathBuf>,
    pub secrets_path: Option<PathBuf>,
}

/// 설정 로드 → 인증 정보 확인 → 세션 생성
pub fn setup(options: &LaunchOptions) -> Result<AppState> {
    // .env 파일 로드 (로컬 환경 대응)
    if let Err(e) = dotenvy::dotenv() {
        log::debug!(".env 파일 없음: {}", e);
    }

    let settings = AppSettings::load_or_default(options.settings_path.as_deref())
        .context("Failed to load settings")?;

    let resolver = match &options.secrets_path {
        Some(path) => CredentialResolver::new(path.clone()),
        None => CredentialResolver::default(),
    };
    let credentials = resolver.resolve();

    let session = DashboardSession::new(credentials, settings)
        .context("Failed to initialize dashboard session")?;
    Ok(AppState::new(session))
}
