use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 키워드별 일간 검색 비중 (DataLab)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: NaiveDate,
    /// 요청한 키워드 묶음 안에서의 상대값 (단위 없음)
    pub ratio: f64,
    pub keyword: String,
}

/// DataLab 검색어 트렌드 요청 본문
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRequest {
    pub start_date: String,
    pub end_date: String,
    pub time_unit: String,
    pub keyword_groups: Vec<KeywordGroup>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    pub group_name: String,
    pub keywords: Vec<String>,
}

impl TrendRequest {
    /// 키워드마다 그룹 하나, 그룹 이름은 키워드 그대로
    pub fn daily(keywords: &[String], start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            time_unit: "date".to_string(),
            keyword_groups: keywords
                .iter()
                .map(|kw| KeywordGroup {
                    group_name: kw.clone(),
                    keywords: vec![kw.clone()],
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendResponse {
    pub results: Vec<TrendGroupResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendGroupResult {
    pub title: String,
    #[serde(default)]
    pub data: Vec<TrendEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendEntry {
    pub period: NaiveDate,
    pub ratio: f64,
}

impl TrendResponse {
    pub(crate) fn into_points(self) -> Vec<TrendPoint> {
        let mut points = Vec::new();
        for group in self.results {
            for entry in group.data {
                points.push(TrendPoint {
                    period: entry.period,
                    ratio: entry.ratio,
                    keyword: group.title.clone(),
                });
            }
        }
        points
    }
}
