use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::utils::text::strip_markup;

/// 검색 API 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Blog,
    Shop,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Blog => "blog",
            SearchKind::Shop => "shop",
        }
    }

    /// API 기본 URL 기준 경로
    pub fn path(&self) -> String {
        format!("/v1/search/{}.json", self.as_str())
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 블로그 검색 결과 고유 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub description: String,
    pub blogger_name: String,
    pub blogger_link: String,
    /// 작성일 (YYYYMMDD)
    pub post_date: String,
}

/// 쇼핑 검색 결과 고유 필드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopProduct {
    pub image: String,
    /// 최저가, API 원문 문자열 그대로
    pub low_price: String,
    pub high_price: String,
    pub mall_name: String,
    pub product_id: String,
    pub product_type: String,
    pub brand: String,
    pub maker: String,
    pub category1: String,
    pub category2: String,
    pub category3: String,
    pub category4: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemDetail {
    Blog(BlogPost),
    Shop(ShopProduct),
}

/// 검색 결과 한 건 (블로그 글 또는 상품), 검색한 키워드 포함
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub keyword: String,
    /// 원문 제목 (<b> 강조 태그 포함)
    pub title: String,
    pub link: String,
    pub detail: ItemDetail,
}

impl SearchItem {
    pub fn from_json(kind: SearchKind, keyword: &str, item: &Value) -> Self {
        let detail = match kind {
            SearchKind::Blog => ItemDetail::Blog(BlogPost {
                description: text_field(item, "description"),
                blogger_name: text_field(item, "bloggername"),
                blogger_link: text_field(item, "bloggerlink"),
                post_date: text_field(item, "postdate"),
            }),
            SearchKind::Shop => ItemDetail::Shop(ShopProduct {
                image: text_field(item, "image"),
                low_price: text_field(item, "lprice"),
                high_price: text_field(item, "hprice"),
                mall_name: text_field(item, "mallName"),
                product_id: text_field(item, "productId"),
                product_type: text_field(item, "productType"),
                brand: text_field(item, "brand"),
                maker: text_field(item, "maker"),
                category1: text_field(item, "category1"),
                category2: text_field(item, "category2"),
                category3: text_field(item, "category3"),
                category4: text_field(item, "category4"),
            }),
        };

        Self {
            keyword: keyword.to_string(),
            title: text_field(item, "title"),
            link: text_field(item, "link"),
            detail,
        }
    }

    /// 강조 태그와 HTML 엔티티를 제거한 제목
    pub fn plain_title(&self) -> String {
        strip_markup(&self.title)
    }

    pub fn blog(&self) -> Option<&BlogPost> {
        match &self.detail {
            ItemDetail::Blog(post) => Some(post),
            ItemDetail::Shop(_) => None,
        }
    }

    pub fn shop(&self) -> Option<&ShopProduct> {
        match &self.detail {
            ItemDetail::Shop(product) => Some(product),
            ItemDetail::Blog(_) => None,
        }
    }

    pub fn post_date(&self) -> Option<&str> {
        self.blog().map(|b| b.post_date.as_str())
    }

    /// 최저가 (숫자 변환 실패 시 None)
    pub fn low_price(&self) -> Option<f64> {
        self.shop().and_then(|s| parse_price(&s.low_price))
    }

    pub fn mall_name(&self) -> Option<&str> {
        self.shop()
            .map(|s| s.mall_name.as_str())
            .filter(|m| !m.is_empty())
    }
}

/// 문자열과 숫자 값 모두 허용, 그 외는 빈 문자열
fn text_field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// 검색 API 응답 한 페이지
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<Value>,
}
