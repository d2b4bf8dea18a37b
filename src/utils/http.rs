use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use crate::config::credentials::NaverCredentials;

pub const CLIENT_ID_HEADER: &str = "x-naver-client-id";
pub const CLIENT_SECRET_HEADER: &str = "x-naver-client-secret";

/// 인증 헤더 두 개 생성. 헤더에 쓸 수 없는 문자(비 ASCII, 제어 문자)가 있으면 None
pub fn credential_headers(credentials: &NaverCredentials) -> Option<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, raw) in [
        (CLIENT_ID_HEADER, &credentials.client_id),
        (CLIENT_SECRET_HEADER, &credentials.client_secret),
    ] {
        let mut value = HeaderValue::from_str(raw).ok()?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(name), value);
    }
    Some(headers)
}

/// 네이버 Open API 전용 HTTP client
/// 인증 헤더가 없으면 헤더 없이 생성
/// (호출 전에 인증 여부를 먼저 확인하므로 실제 요청은 나가지 않는다)
pub fn build_naver_client(auth: Option<HeaderMap>, timeout_secs: u64) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(auth) = auth {
        headers.extend(auth);
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .build()?;
    Ok(client)
}
