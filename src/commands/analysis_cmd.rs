use serde::Serialize;

use crate::models::analysis::AnalysisReport;
use crate::models::diagnostics::AnalysisError;
use crate::AppState;

/// 인증 정보 미설정 안내
pub const CREDENTIALS_HELP: &str = "로컬: .env 파일 / 배포: 시크릿 파일(.secrets/secrets.toml) 설정 필요";

/// 데이터가 없을 때 확인사항
pub const EMPTY_RESULT_HELP: &str = "💡 확인사항:\n\
- API Client ID와 Secret이 올바르게 설정되었는지\n\
- 네이버 개발자 센터에서 해당 API가 활성화되었는지\n\
- 키워드 입력이 정확한지";

#[derive(Debug, Clone, Serialize)]
pub struct CredentialsStatus {
    pub configured: bool,
    pub message: Option<String>,
}

/// 쉼표로 구분된 키워드 입력 파싱 (공백 제거, 빈 항목 제외, 중복 허용)
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// 실시간 분석 실행
pub async fn run_analysis(
    state: &AppState,
    keywords: String,
    iqr_filter: bool,
) -> Result<AnalysisReport, String> {
    let keywords = parse_keywords(&keywords);
    *state.last_keywords.lock().map_err(|e| e.to_string())? = keywords.clone();

    state
        .session
        .run_analysis(&keywords, iqr_filter)
        .await
        .map_err(|e| describe_analysis_error(&e))
}

/// 캐시를 비우고 다시 수집
pub async fn rerun_analysis(
    state: &AppState,
    keywords: String,
    iqr_filter: bool,
) -> Result<AnalysisReport, String> {
    state.session.reset();
    run_analysis(state, keywords, iqr_filter).await
}

/// 마지막으로 분석한 키워드 목록
pub fn get_last_keywords(state: &AppState) -> Vec<String> {
    state
        .last_keywords
        .lock()
        .map(|k| k.clone())
        .unwrap_or_default()
}

pub fn credentials_status(state: &AppState) -> CredentialsStatus {
    if state.session.has_credentials() {
        CredentialsStatus { configured: true, message: None }
    } else {
        CredentialsStatus {
            configured: false,
            message: Some(format!(
                "⚠️ 네이버 API 인증 정보(Client ID 또는 Secret)가 설정되지 않았습니다. {}",
                CREDENTIALS_HELP
            )),
        }
    }
}

fn describe_analysis_error(err: &AnalysisError) -> String {
    match err {
        AnalysisError::NoKeywords => err.to_string(),
        AnalysisError::EmptyResultSet { diagnostics } => {
            let mut lines = vec![format!("❌ {}", err)];
            lines.extend(diagnostics.iter().map(|d| d.message()));
            lines.push(EMPTY_RESULT_HELP.to_string());
            lines.join("\n")
        }
    }
}
