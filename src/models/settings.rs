use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 대시보드 설정 (keyword-insight.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub search_page_size: u32,
    #[serde(default = "default_max_count")]
    pub search_max_count: u32,
    /// 검색 페이지 사이 대기 시간 (호출 제한 대응)
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: u64,
    #[serde(default = "default_window_start")]
    pub trend_start_date: NaiveDate,
    /// 월별 블로그 빈도 집계 하한일
    #[serde(default = "default_window_start")]
    pub monthly_cutoff: NaiveDate,
    #[serde(default = "default_top_mall_count")]
    pub top_mall_count: usize,
    #[serde(default = "default_recent_trend_rows")]
    pub recent_trend_rows: usize,
    /// 블로그 / 쇼핑 결과 표 최대 행 수
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
}

fn default_api_base_url() -> String { "https://openapi.naver.com".to_string() }
fn default_request_timeout() -> u64 { 10 }
fn default_page_size() -> u32 { 100 }
fn default_max_count() -> u32 { 1000 }
fn default_page_delay() -> u64 { 100 }
fn default_window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}
fn default_top_mall_count() -> usize { 10 }
fn default_recent_trend_rows() -> usize { 20 }
fn default_table_rows() -> usize { 500 }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            search_page_size: default_page_size(),
            search_max_count: default_max_count(),
            page_delay_ms: default_page_delay(),
            trend_start_date: default_window_start(),
            monthly_cutoff: default_window_start(),
            top_mall_count: default_top_mall_count(),
            recent_trend_rows: default_recent_trend_rows(),
            table_rows: default_table_rows(),
        }
    }
}

impl AppSettings {
    /// TOML 설정 파일 로드. 없는 키는 기본값 사용
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: AppSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        Ok(settings)
    }

    /// `path` 가 없으면 기본값 사용
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                log::info!("설정 파일 없음 ({}), 기본값 사용", p.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
