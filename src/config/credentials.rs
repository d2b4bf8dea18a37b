use std::fmt;
use std::path::PathBuf;

pub const CLIENT_ID_KEY: &str = "NAVER_CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "NAVER_CLIENT_SECRET";

/// 배포 환경 시크릿 파일 기본 경로
pub const DEFAULT_SECRETS_PATH: &str = ".secrets/secrets.toml";

/// 네이버 API 인증 정보
#[derive(Clone, PartialEq, Eq)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl NaverCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// 두 값 모두 있고 공백이 아닐 때만 Some
    fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        let client_id = client_id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        let client_secret = client_secret.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        Some(Self { client_id, client_secret })
    }
}

impl fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// 인증 정보 조회 순서: 1. 시크릿 파일 (배포용)  2. 환경 변수 / .env (로컬용)
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    secrets_path: PathBuf,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_PATH)
    }
}

impl CredentialResolver {
    pub fn new(secrets_path: impl Into<PathBuf>) -> Self {
        Self { secrets_path: secrets_path.into() }
    }

    /// 실패하지 않음: 어느 쪽에도 두 값이 모두 없으면 `None`
    pub fn resolve(&self) -> Option<NaverCredentials> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// [`resolve`](Self::resolve) 와 동일, 환경 변수 조회 함수를 주입받음
    pub fn resolve_with<F>(&self, env: F) -> Option<NaverCredentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(creds) = self.from_secret_store() {
            log::debug!("인증 정보: 시크릿 파일 사용 ({})", self.secrets_path.display());
            return Some(creds);
        }

        let creds = NaverCredentials::from_parts(env(CLIENT_ID_KEY), env(CLIENT_SECRET_KEY));
        match &creds {
            Some(_) => log::debug!("인증 정보: 환경 변수 사용"),
            None => log::warn!("네이버 API 인증 정보가 설정되지 않았습니다 ({} / {})", CLIENT_ID_KEY, CLIENT_SECRET_KEY),
        }
        creds
    }

    fn from_secret_store(&self) -> Option<NaverCredentials> {
        if !self.secrets_path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(&self.secrets_path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("시크릿 파일 읽기 실패 ({}): {}", self.secrets_path.display(), e);
                return None;
            }
        };
        let table: toml::Table = match content.parse() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("시크릿 파일 파싱 실패 ({}): {}", self.secrets_path.display(), e);
                return None;
            }
        };

        let lookup = |key: &str| table.get(key).and_then(|v| v.as_str()).map(str::to_string);
        NaverCredentials::from_parts(lookup(CLIENT_ID_KEY), lookup(CLIENT_SECRET_KEY))
    }
}
