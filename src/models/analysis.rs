use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::diagnostics::{FetchDiagnostic, SearchResults};
use super::search::SearchItem;
use super::trend::TrendPoint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// (YYYY-MM, keyword) 별 게시물 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// 그룹별 기술 통계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub group: String,
    pub count: usize,
    pub mean: f64,
    /// 표본 표준편차 (값이 2개 미만이면 None)
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordColor {
    pub keyword: String,
    pub color: String,
}

/// 블로그 결과 표 한 행 (강조 태그 제거된 제목)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRow {
    pub keyword: String,
    pub title: String,
    pub blogger_name: String,
    pub post_date: String,
    pub link: String,
}

/// 쇼핑 결과 표 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRow {
    pub keyword: String,
    pub title: String,
    pub low_price: Option<f64>,
    pub mall_name: String,
    pub category1: String,
    pub link: String,
}

/// 화면 구성용 파생 데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    /// 일자별 트렌드 요약표 (최신순)
    pub trend_recent: Vec<TrendPoint>,
    pub trend_stats: Vec<GroupStats>,
    /// 키워드별 전체 블로그 포스트 수 (API total 기준)
    pub blog_post_counts: Vec<KeywordCount>,
    pub blog_monthly: Vec<MonthlyCount>,
    /// 가격 박스플롯용 쇼핑 항목 (IQR 옵션 시 이상치 제거)
    pub price_distribution: Vec<SearchItem>,
    /// 주요 판매처 점유율 (Top N)
    pub mall_share: Vec<CategoryCount>,
    pub price_summary: Vec<GroupStats>,
    /// 블로그 결과 표 (최대 `table_rows` 행)
    pub blog_table: Vec<BlogRow>,
    pub shop_table: Vec<ShopRow>,
}

/// 한 번의 분석 실행 결과 전체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 수집 기준일
    pub collected_on: NaiveDate,
    pub keywords: Vec<String>,
    pub keyword_colors: Vec<KeywordColor>,
    pub iqr_filter: bool,
    pub trend: Vec<TrendPoint>,
    pub blog: SearchResults,
    pub shop: SearchResults,
    pub diagnostics: Vec<FetchDiagnostic>,
    pub views: DashboardViews,
}
