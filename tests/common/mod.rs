#![allow(dead_code)]

use app_lib::config::credentials::NaverCredentials;
use app_lib::models::settings::AppSettings;
use mockito::Matcher;
use serde_json::{json, Value};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

pub fn credentials() -> Option<NaverCredentials> {
    Some(NaverCredentials::new(CLIENT_ID, CLIENT_SECRET))
}

/// 목 서버를 가리키는 설정 (페이지 간 지연 없음)
pub fn settings_for(base_url: &str) -> AppSettings {
    AppSettings {
        api_base_url: base_url.to_string(),
        page_delay_ms: 0,
        ..AppSettings::default()
    }
}

pub fn page_query(keyword: &str, start: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("query".into(), keyword.into()),
        Matcher::UrlEncoded("start".into(), start.to_string()),
        Matcher::UrlEncoded("display".into(), "100".into()),
    ])
}

/// `offset` 번부터 블로그 글 `count` 건
pub fn blog_page(total: u64, keyword: &str, offset: usize, count: usize) -> Value {
    let items: Vec<Value> = (offset..offset + count)
        .map(|i| {
            json!({
                "title": format!("<b>{}</b> 후기 {}", keyword, i),
                "link": format!("https://blog.naver.com/u/{}", i),
                "description": "...",
                "bloggername": format!("blogger{}", i % 7),
                "bloggerlink": "blog.naver.com/u",
                "postdate": if i % 2 == 0 { "20250115" } else { "20241215" }
            })
        })
        .collect();
    json!({
        "lastBuildDate": "Mon, 03 Mar 2025 10:00:00 +0900",
        "total": total,
        "start": offset + 1,
        "display": count,
        "items": items
    })
}

pub fn shop_page(total: u64, prices: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = prices
        .iter()
        .enumerate()
        .map(|(i, (price, mall))| {
            json!({
                "title": format!("상품 {}", i),
                "link": format!("https://search.shopping.naver.com/{}", i),
                "image": "",
                "lprice": price,
                "hprice": "",
                "mallName": mall,
                "productId": format!("{}", 1000 + i),
                "productType": "2",
                "brand": "",
                "maker": "",
                "category1": "식품",
                "category2": "",
                "category3": "",
                "category4": ""
            })
        })
        .collect();
    json!({ "total": total, "start": 1, "display": items.len(), "items": items })
}

pub fn empty_page(total: u64) -> Value {
    json!({ "total": total, "start": 1, "display": 0, "items": [] })
}

pub fn trend_body(groups: &[(&str, Vec<(&str, f64)>)]) -> Value {
    let results: Vec<Value> = groups
        .iter()
        .map(|(title, data)| {
            let data: Vec<Value> = data
                .iter()
                .map(|(period, ratio)| json!({ "period": period, "ratio": ratio }))
                .collect();
            json!({ "title": title, "keywords": [title], "data": data })
        })
        .collect();
    json!({
        "startDate": "2025-01-01",
        "endDate": "2025-01-03",
        "timeUnit": "date",
        "results": results
    })
}

pub fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
