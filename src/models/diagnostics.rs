use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::search::SearchItem;

/// API 호출 실패 분류. Client 경계를 넘어 전파되지 않고 진단 정보로 변환된다.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetchError {
    #[error("API 인증 정보(Client ID 또는 Secret)가 설정되지 않았습니다")]
    AuthMissing,
    #[error("{endpoint} 요청 실패: HTTP {status} {body}")]
    HttpError {
        status: u16,
        endpoint: String,
        /// 응답 본문 (앞부분만)
        body: String,
    },
    #[error("API 연결 오류: {cause}")]
    NetworkError { cause: String },
    #[error("응답 데이터 처리 오류: {cause}")]
    DecodeError { cause: String },
}

impl FetchError {
    /// HTTP 상태 오류는 경고, 나머지는 오류
    pub fn severity(&self) -> Severity {
        match self {
            FetchError::HttpError { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::DecodeError { cause: e.to_string() }
        } else {
            FetchError::NetworkError { cause: e.to_string() }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::DecodeError { cause: e.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// 사용자에게 보여줄 수집 경고/오류
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchDiagnostic {
    pub severity: Severity,
    /// trend / blog / shop 중 하나
    pub endpoint: String,
    pub keyword: Option<String>,
    pub error: FetchError,
}

impl FetchDiagnostic {
    pub fn new(endpoint: &str, keyword: Option<&str>, error: FetchError) -> Self {
        Self {
            severity: error.severity(),
            endpoint: endpoint.to_string(),
            keyword: keyword.map(str::to_string),
            error,
        }
    }

    /// 화면 표시용 메시지
    pub fn message(&self) -> String {
        let prefix = match self.severity {
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        };
        match &self.keyword {
            Some(kw) => format!("{} '{}' {}: {}", prefix, kw, self.endpoint, self.error),
            None => format!("{} {}: {}", prefix, self.endpoint, self.error),
        }
    }
}

/// 수집 데이터 + 수집 중 발생한 진단 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome<T> {
    pub data: T,
    pub diagnostics: Vec<FetchDiagnostic>,
}

impl<T: Default> FetchOutcome<T> {
    pub fn empty() -> Self {
        Self { data: T::default(), diagnostics: Vec::new() }
    }

    pub fn failed(diagnostic: FetchDiagnostic) -> Self {
        Self { data: T::default(), diagnostics: vec![diagnostic] }
    }
}

/// 키워드별 API 보고 전체 건수 (수집 건수와 별개)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSummary {
    entries: Vec<KeywordTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTotal {
    pub keyword: String,
    pub total: u64,
}

impl CountSummary {
    pub fn set(&mut self, keyword: &str, total: u64) {
        match self.entries.iter_mut().find(|e| e.keyword == keyword) {
            Some(entry) => entry.total = total,
            None => self.entries.push(KeywordTotal { keyword: keyword.to_string(), total }),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.keyword == keyword).map(|e| e.total)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 검색 API 수집 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub items: Vec<SearchItem>,
    pub totals: CountSummary,
    /// 첫 페이지 이후 실패로 수집이 중단된 키워드
    pub incomplete_keywords: Vec<String>,
}

/// 분석 실행 단위 오류
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("분석할 키워드가 없습니다")]
    NoKeywords,
    #[error("수집된 데이터가 없습니다. 에러 메시지를 확인하고 API 설정을 점검해 주세요.")]
    EmptyResultSet { diagnostics: Vec<FetchDiagnostic> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let http = FetchError::HttpError {
            status: 429,
            endpoint: "shop".into(),
            body: String::new(),
        };
        assert_eq!(http.severity(), Severity::Warning);
        assert_eq!(FetchError::NetworkError { cause: "timed out".into() }.severity(), Severity::Error);
        assert_eq!(FetchError::AuthMissing.severity(), Severity::Error);
    }

    #[test]
    fn test_diagnostic_message_mentions_keyword() {
        let diag = FetchDiagnostic::new(
            "blog",
            Some("마시멜로우"),
            FetchError::HttpError { status: 401, endpoint: "blog".into(), body: String::new() },
        );
        let msg = diag.message();
        assert!(msg.contains("마시멜로우"));
        assert!(msg.contains("401"));
        assert!(msg.starts_with("⚠️"));
    }

    #[test]
    fn test_count_summary_overwrites_in_place() {
        let mut totals = CountSummary::default();
        totals.set("A", 0);
        totals.set("B", 7);
        totals.set("A", 1200);
        assert_eq!(totals.get("A"), Some(1200));
        assert_eq!(totals.get("C"), None);
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["entries"][0]["keyword"], "A");
        assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    }
}
