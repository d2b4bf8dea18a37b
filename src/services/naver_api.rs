use anyhow::Result;
use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::credentials::NaverCredentials;
use crate::models::diagnostics::{FetchDiagnostic, FetchError, FetchOutcome, SearchResults};
use crate::models::search::{SearchItem, SearchKind, SearchPage};
use crate::models::settings::AppSettings;
use crate::models::trend::{TrendPoint, TrendRequest, TrendResponse};
use crate::utils::http::{build_naver_client, credential_headers};
use crate::utils::text::truncate_chars;

const TREND_PATH: &str = "/v1/datalab/search";
const TREND_ENDPOINT: &str = "trend";
/// 검색 API `display` 최대값
const MAX_PAGE_SIZE: u32 = 100;
const ERROR_BODY_CHARS: usize = 200;

/// 네이버 Open API 클라이언트 (DataLab 트렌드 / 블로그 / 쇼핑 검색)
///
/// 모든 실패는 [`FetchDiagnostic`] 으로 변환되어 빈 결과 또는 부분 결과와 함께 반환된다.
pub struct NaverApiClient {
    client: reqwest::Client,
    credentials: Option<NaverCredentials>,
    base_url: String,
    page_size: u32,
    page_delay: Duration,
}

impl NaverApiClient {
    /// 헤더에 쓸 수 없는 인증 정보는 없는 것으로 취급한다.
    pub fn new(credentials: Option<NaverCredentials>, settings: &AppSettings) -> Result<Self> {
        let (credentials, auth) = match credentials {
            Some(creds) => match credential_headers(&creds) {
                Some(headers) => (Some(creds), Some(headers)),
                None => {
                    log::warn!("인증 정보에 HTTP 헤더로 보낼 수 없는 문자가 포함되어 있습니다. 인증 정보 없이 진행합니다");
                    (None, None)
                }
            },
            None => (None, None),
        };
        let client = build_naver_client(auth, settings.request_timeout_secs)?;
        Ok(Self {
            client,
            credentials,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            page_size: settings.search_page_size.clamp(1, MAX_PAGE_SIZE),
            page_delay: Duration::from_millis(settings.page_delay_ms),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// 검색어 트렌드 (일 단위). 전부 성공하거나 전부 실패한다.
    pub async fn fetch_trend(
        &self,
        keywords: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> FetchOutcome<Vec<TrendPoint>> {
        if keywords.is_empty() {
            return FetchOutcome::empty();
        }
        if !self.has_credentials() {
            return FetchOutcome::failed(FetchDiagnostic::new(TREND_ENDPOINT, None, FetchError::AuthMissing));
        }

        let body = TrendRequest::daily(keywords, start_date, end_date);
        match self.request_trend(&body).await {
            Ok(points) => {
                log::info!("트렌드 수집 완료: {} 키워드, {} 건", keywords.len(), points.len());
                FetchOutcome { data: points, diagnostics: Vec::new() }
            }
            Err(e) => {
                log::warn!("트렌드 데이터 수집 실패: {}", e);
                FetchOutcome::failed(FetchDiagnostic::new(TREND_ENDPOINT, None, e))
            }
        }
    }

    async fn request_trend(&self, body: &TrendRequest) -> Result<Vec<TrendPoint>, FetchError> {
        let url = format!("{}{}", self.base_url, TREND_PATH);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                endpoint: TREND_ENDPOINT.to_string(),
                body: truncate_chars(&text, ERROR_BODY_CHARS),
            });
        }

        let text = resp.text().await?;
        let parsed: TrendResponse = serde_json::from_str(&text)?;
        Ok(parsed.into_points())
    }

    /// 키워드별 검색 결과 수집 (최대 `max_count` 건, 페이지 단위 순차 요청)
    ///
    /// 실패한 페이지는 해당 키워드의 수집만 중단한다. 첫 페이지 실패만 진단으로 남기고,
    /// 이후 페이지 실패는 수집분을 유지한 채 `incomplete_keywords` 에 기록한다.
    pub async fn fetch_search_results(
        &self,
        kind: SearchKind,
        keywords: &[String],
        max_count: u32,
    ) -> FetchOutcome<SearchResults> {
        if keywords.is_empty() {
            return FetchOutcome::empty();
        }
        if !self.has_credentials() {
            return FetchOutcome::failed(FetchDiagnostic::new(kind.as_str(), None, FetchError::AuthMissing));
        }

        let mut results = SearchResults::default();
        let mut diagnostics = Vec::new();

        for keyword in keywords {
            results.totals.set(keyword, 0);
            let collected_before = results.items.len();

            let mut next = (max_count > 1).then_some(1u32);
            while let Some(start) = next {
                match self.fetch_page(kind, keyword, start).await {
                    Ok(page) => {
                        if start == 1 {
                            results.totals.set(keyword, page.total);
                        }
                        if page.items.is_empty() {
                            break;
                        }
                        results
                            .items
                            .extend(page.items.iter().map(|item| SearchItem::from_json(kind, keyword, item)));

                        next = next_start(start, self.page_size, max_count);
                        if next.is_some() && !self.page_delay.is_zero() {
                            sleep(self.page_delay).await;
                        }
                    }
                    Err(e) if start == 1 => {
                        log::warn!("'{}' {} 검색 실패: {}", keyword, kind, e);
                        diagnostics.push(FetchDiagnostic::new(kind.as_str(), Some(keyword), e));
                        break;
                    }
                    Err(e) => {
                        log::warn!("'{}' {} 검색 중단 (start={}): {}", keyword, kind, start, e);
                        results.incomplete_keywords.push(keyword.clone());
                        break;
                    }
                }
            }

            log::info!(
                "'{}' {} 수집: {} 건 (전체 {})",
                keyword,
                kind,
                results.items.len() - collected_before,
                results.totals.get(keyword).unwrap_or(0)
            );
        }

        FetchOutcome { data: results, diagnostics }
    }

    async fn fetch_page(&self, kind: SearchKind, keyword: &str, start: u32) -> Result<SearchPage, FetchError> {
        let url = format!("{}{}", self.base_url, kind.path());
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("query", keyword.to_string()),
                ("display", self.page_size.to_string()),
                ("start", start.to_string()),
                ("sort", "sim".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                endpoint: kind.as_str().to_string(),
                body: truncate_chars(&text, ERROR_BODY_CHARS),
            });
        }

        let text = resp.text().await?;
        let page: SearchPage = serde_json::from_str(&text)?;
        Ok(page)
    }
}

/// 다음 페이지 시작 위치. `max_count` 에 도달하거나 u32 범위를 넘으면 None
fn next_start(start: u32, page_size: u32, max_count: u32) -> Option<u32> {
    start.checked_add(page_size).filter(|&next| next < max_count)
}
