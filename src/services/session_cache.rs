use chrono::NaiveDate;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

use crate::models::search::SearchKind;

/// 캐시 키: (작업, 키워드 목록 순서 포함, 기간 또는 검색 종류)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Trend {
        keywords: Vec<String>,
        start: NaiveDate,
        end: NaiveDate,
    },
    Search {
        kind: SearchKind,
        keywords: Vec<String>,
        max_count: u32,
    },
}

/// 세션 단위 메모이제이션. TTL, 만료 없음. [`clear`](Self::clear) 또는 재시작 시에만 비워짐.
///
/// 키마다 `OnceCell` 하나를 두어 같은 키의 동시 호출은 진행 중인 수집 하나를 기다린다.
pub struct SessionCache<K, V> {
    entries: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> Default for SessionCache<K, V> {
    fn default() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }
}

impl<K, V> SessionCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.entry(key).or_default().clone()
        };
        cell.get_or_init(fetch).await.clone()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// 수집이 끝난 항목 수
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
