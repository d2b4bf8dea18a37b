use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::config::credentials::NaverCredentials;
use crate::models::analysis::{AnalysisReport, DashboardViews};
use crate::models::diagnostics::{AnalysisError, FetchOutcome, SearchResults};
use crate::models::search::{SearchItem, SearchKind};
use crate::models::settings::AppSettings;
use crate::models::trend::TrendPoint;
use crate::services::aggregator;
use crate::services::naver_api::NaverApiClient;
use crate::services::session_cache::{CacheKey, SessionCache};

pub type TrendOutcome = Arc<FetchOutcome<Vec<TrendPoint>>>;
pub type SearchOutcome = Arc<FetchOutcome<SearchResults>>;

/// 대시보드 세션: API 클라이언트 + 세션 캐시 + 집계
///
/// 같은 세션 안의 동일한 호출은 [`reset`](Self::reset) 전까지 캐시에서 응답
pub struct DashboardSession {
    client: NaverApiClient,
    settings: AppSettings,
    trend_cache: SessionCache<CacheKey, TrendOutcome>,
    search_cache: SessionCache<CacheKey, SearchOutcome>,
}

impl DashboardSession {
    pub fn new(credentials: Option<NaverCredentials>, settings: AppSettings) -> Result<Self> {
        let client = NaverApiClient::new(credentials, &settings)?;
        Ok(Self {
            client,
            settings,
            trend_cache: SessionCache::new(),
            search_cache: SessionCache::new(),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.client.has_credentials()
    }

    pub async fn fetch_trend(&self, keywords: &[String], start: NaiveDate, end: NaiveDate) -> TrendOutcome {
        let key = CacheKey::Trend { keywords: keywords.to_vec(), start, end };
        self.trend_cache
            .get_or_fetch(key, || async {
                Arc::new(self.client.fetch_trend(keywords, start, end).await)
            })
            .await
    }

    pub async fn fetch_search_results(&self, kind: SearchKind, keywords: &[String], max_count: u32) -> SearchOutcome {
        let key = CacheKey::Search { kind, keywords: keywords.to_vec(), max_count };
        self.search_cache
            .get_or_fetch(key, || async {
                Arc::new(self.client.fetch_search_results(kind, keywords, max_count).await)
            })
            .await
    }

    /// 명시적 재실행: 세션 캐시 비우기
    pub fn reset(&self) {
        if self.trend_cache.is_empty() && self.search_cache.is_empty() {
            return;
        }
        let cleared = self.trend_cache.len() + self.search_cache.len();
        self.trend_cache.clear();
        self.search_cache.clear();
        log::info!("세션 캐시 초기화: {}건 삭제", cleared);
    }

    /// 트렌드 조회 기간: 설정 시작일 ~ 오늘
    pub fn default_trend_window(&self) -> (NaiveDate, NaiveDate) {
        let today = Local::now().date_naive();
        (self.settings.trend_start_date, today.max(self.settings.trend_start_date))
    }

    /// 실시간 분석 실행: 트렌드, 블로그, 쇼핑 순으로 수집 후 화면용 데이터 생성
    pub async fn run_analysis(&self, keywords: &[String], iqr_filter: bool) -> Result<AnalysisReport, AnalysisError> {
        if keywords.is_empty() {
            return Err(AnalysisError::NoKeywords);
        }

        let (start, end) = self.default_trend_window();
        let max_count = self.settings.search_max_count;

        log::info!("1. 쇼핑 트렌드 수집 중... ({})", keywords.join(", "));
        let trend = self.fetch_trend(keywords, start, end).await;
        log::info!("2. 블로그 검색 결과 수집 중 (최대 {}건)...", max_count);
        let blog = self.fetch_search_results(SearchKind::Blog, keywords, max_count).await;
        log::info!("3. 쇼핑 검색 결과 수집 중 (최대 {}건)...", max_count);
        let shop = self.fetch_search_results(SearchKind::Shop, keywords, max_count).await;

        let diagnostics: Vec<_> = trend
            .diagnostics
            .iter()
            .chain(&blog.diagnostics)
            .chain(&shop.diagnostics)
            .cloned()
            .collect();

        if trend.data.is_empty() && blog.data.items.is_empty() && shop.data.items.is_empty() {
            log::error!("수집된 데이터가 없습니다 (진단 {}건)", diagnostics.len());
            return Err(AnalysisError::EmptyResultSet { diagnostics });
        }

        let views = self.build_views(&trend.data, &blog.data, &shop.data.items, iqr_filter);
        log::info!(
            "데이터 수집 완료: 트렌드 {} / 블로그 {} / 쇼핑 {}",
            trend.data.len(),
            blog.data.items.len(),
            shop.data.items.len()
        );

        Ok(AnalysisReport {
            collected_on: Local::now().date_naive(),
            keywords: keywords.to_vec(),
            keyword_colors: aggregator::keyword_palette(keywords),
            iqr_filter,
            trend: trend.data.clone(),
            blog: blog.data.clone(),
            shop: shop.data.clone(),
            diagnostics,
            views,
        })
    }

    fn build_views(
        &self,
        trend: &[TrendPoint],
        blog: &SearchResults,
        shop: &[SearchItem],
        iqr_filter: bool,
    ) -> DashboardViews {
        let priced: Vec<SearchItem> = shop.iter().filter(|i| i.low_price().is_some()).cloned().collect();
        let price_distribution = if iqr_filter {
            aggregator::outlier_filter(&priced, SearchItem::low_price, |i| i.keyword.as_str())
        } else {
            priced
        };

        DashboardViews {
            trend_recent: aggregator::recent_trend_rows(trend, self.settings.recent_trend_rows),
            trend_stats: aggregator::describe_numeric(trend, |p| p.keyword.as_str(), |p| Some(p.ratio)),
            blog_post_counts: aggregator::keyword_post_counts(&blog.items, &blog.totals),
            blog_monthly: aggregator::monthly_bucket(
                &blog.items,
                SearchItem::post_date,
                |i| i.keyword.as_str(),
                self.settings.monthly_cutoff,
            ),
            price_distribution,
            mall_share: aggregator::top_n(shop, SearchItem::mall_name, self.settings.top_mall_count),
            price_summary: aggregator::describe_numeric(shop, |i| i.keyword.as_str(), SearchItem::low_price),
            blog_table: aggregator::blog_rows(&blog.items, self.settings.table_rows),
            shop_table: aggregator::shop_rows(shop, self.settings.table_rows),
        }
    }
}
