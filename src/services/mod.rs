pub mod aggregator;
pub mod dashboard;
pub mod naver_api;
pub mod session_cache;
