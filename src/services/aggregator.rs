use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use crate::models::analysis::{
    BlogRow, CategoryCount, GroupStats, KeywordColor, KeywordCount, MonthlyCount, ShopRow,
};
use crate::models::diagnostics::CountSummary;
use crate::models::search::SearchItem;
use crate::models::trend::TrendPoint;

/// IQR 배수
const IQR_MULTIPLIER: f64 = 1.5;
/// 이보다 적은 그룹은 사분위수가 의미 없으므로 필터링하지 않음
const MIN_GROUP_FOR_IQR: usize = 4;

/// 두바이 초콜릿 브라운, 피스타치오 그린, 카라멜 골드
pub const KEYWORD_PALETTE: [&str; 3] = ["#3B2A22", "#6E8F3D", "#C89B5C"];

/// 키워드별 수집 건수 (처음 등장한 순서)
pub fn count_by_keyword(items: &[SearchItem]) -> Vec<KeywordCount> {
    let mut counts: Vec<KeywordCount> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|c| c.keyword == item.keyword) {
            Some(c) => c.count += 1,
            None => counts.push(KeywordCount { keyword: item.keyword.clone(), count: 1 }),
        }
    }
    counts
}

/// 그룹별 IQR 이상치 제거
///
/// 그룹마다 `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` 범위를 따로 계산한다. 값이 4개 미만인 그룹은
/// 그대로 통과. 필터링되는 그룹에서 값이 없는 행은 제외. 남은 행은 입력 순서 유지.
pub fn outlier_filter<T, V, G>(items: &[T], value: V, group: G) -> Vec<T>
where
    T: Clone,
    V: Fn(&T) -> Option<f64>,
    G: Fn(&T) -> &str,
{
    let mut values: HashMap<&str, Vec<f64>> = HashMap::new();
    for item in items {
        let entry = values.entry(group(item)).or_default();
        if let Some(v) = value(item) {
            entry.push(v);
        }
    }

    let bounds: HashMap<&str, Option<(f64, f64)>> = values
        .into_iter()
        .map(|(key, mut vals)| {
            if vals.len() < MIN_GROUP_FOR_IQR {
                return (key, None);
            }
            vals.sort_by(f64::total_cmp);
            let q1 = quantile(&vals, 0.25);
            let q3 = quantile(&vals, 0.75);
            let iqr = q3 - q1;
            (key, Some((q1 - IQR_MULTIPLIER * iqr, q3 + IQR_MULTIPLIER * iqr)))
        })
        .collect();

    items
        .iter()
        .filter(|&item| match bounds.get(group(item)).copied().flatten() {
            None => true,
            Some((lower, upper)) => value(item).is_some_and(|v| v >= lower && v <= upper),
        })
        .cloned()
        .collect()
}

/// 월별 (YYYY-MM, 키워드) 빈도. `cutoff` 이전 날짜와 파싱 불가 날짜는 제외.
pub fn monthly_bucket<T, D, K>(items: &[T], date: D, keyword: K, cutoff: NaiveDate) -> Vec<MonthlyCount>
where
    D: Fn(&T) -> Option<&str>,
    K: Fn(&T) -> &str,
{
    let mut buckets: BTreeMap<(String, String), usize> = BTreeMap::new();
    for item in items {
        let Some(day) = date(item).and_then(parse_compact_date) else {
            continue;
        };
        if day < cutoff {
            continue;
        }
        let month = format!("{:04}-{:02}", day.year(), day.month());
        *buckets.entry((month, keyword(item).to_string())).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|((month, keyword), count)| MonthlyCount { month, keyword, count })
        .collect()
}

/// 그룹별 기술 통계 (count, mean, std, min, 사분위수, max)
pub fn describe_numeric<T, G, V>(items: &[T], group: G, value: V) -> Vec<GroupStats>
where
    G: Fn(&T) -> &str,
    V: Fn(&T) -> Option<f64>,
{
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for item in items {
        let Some(v) = value(item) else { continue };
        let key = group(item);
        match groups.iter_mut().find(|(g, _)| *g == key) {
            Some((_, vals)) => vals.push(v),
            None => groups.push((key, vec![v])),
        }
    }

    groups
        .into_iter()
        .map(|(key, mut vals)| {
            vals.sort_by(f64::total_cmp);
            let n = vals.len();
            let mean = vals.iter().sum::<f64>() / n as f64;
            let std = (n > 1).then(|| {
                let variance = vals.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
                variance.sqrt()
            });
            GroupStats {
                group: key.to_string(),
                count: n,
                mean,
                std,
                min: vals[0],
                q1: quantile(&vals, 0.25),
                median: quantile(&vals, 0.5),
                q3: quantile(&vals, 0.75),
                max: vals[n - 1],
            }
        })
        .collect()
}

/// 범주 빈도 상위 N개 (동률은 먼저 등장한 순서)
pub fn top_n<T, C>(items: &[T], category: C, n: usize) -> Vec<CategoryCount>
where
    C: Fn(&T) -> Option<&str>,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let Some(cat) = category(item) else { continue };
        match index.get(cat) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(cat, counts.len());
                counts.push(CategoryCount { category: cat.to_string(), count: 1 });
            }
        }
    }

    // 안정 정렬: 동률은 먼저 등장한 순서
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// 일자별 트렌드 요약표: 최신 날짜 우선, 같은 날짜는 키워드 오름차순
pub fn recent_trend_rows(points: &[TrendPoint], n: usize) -> Vec<TrendPoint> {
    let mut rows = points.to_vec();
    rows.sort_by(|a, b| b.period.cmp(&a.period).then_with(|| a.keyword.cmp(&b.keyword)));
    rows.truncate(n);
    rows
}

/// 키워드별 전체 포스트 수 (수집 건수가 아닌 API 보고 total).
/// total 정보가 없으면 수집 건수 사용
pub fn keyword_post_counts(items: &[SearchItem], totals: &CountSummary) -> Vec<KeywordCount> {
    let collected = count_by_keyword(items);
    if totals.is_empty() {
        return collected;
    }
    collected
        .into_iter()
        .map(|c| KeywordCount {
            count: totals.get(&c.keyword).unwrap_or(0),
            keyword: c.keyword,
        })
        .collect()
}

/// 블로그 결과 표: 입력 순서대로 최대 n 행
pub fn blog_rows(items: &[SearchItem], n: usize) -> Vec<BlogRow> {
    items
        .iter()
        .filter_map(|item| {
            let post = item.blog()?;
            Some(BlogRow {
                keyword: item.keyword.clone(),
                title: item.plain_title(),
                blogger_name: post.blogger_name.clone(),
                post_date: post.post_date.clone(),
                link: item.link.clone(),
            })
        })
        .take(n)
        .collect()
}

/// 쇼핑 결과 표: 입력 순서대로 최대 n 행
pub fn shop_rows(items: &[SearchItem], n: usize) -> Vec<ShopRow> {
    items
        .iter()
        .filter_map(|item| {
            let product = item.shop()?;
            Some(ShopRow {
                keyword: item.keyword.clone(),
                title: item.plain_title(),
                low_price: item.low_price(),
                mall_name: product.mall_name.clone(),
                category1: product.category1.clone(),
                link: item.link.clone(),
            })
        })
        .take(n)
        .collect()
}

/// 키워드 순서대로 고정 색상 배정
pub fn keyword_palette(keywords: &[String]) -> Vec<KeywordColor> {
    keywords
        .iter()
        .enumerate()
        .map(|(i, kw)| KeywordColor {
            keyword: kw.clone(),
            color: KEYWORD_PALETTE[i % KEYWORD_PALETTE.len()].to_string(),
        })
        .collect()
}

/// 선형 보간 분위수. `sorted` 는 비어 있으면 안 됨
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// YYYYMMDD 파싱
fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        group: String,
        value: Option<f64>,
        tag: u32,
    }

    fn rows(group: &str, values: &[f64]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Row { group: group.to_string(), value: Some(*v), tag: i as u32 })
            .collect()
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        assert!((quantile(&v, 0.25) - 2.25).abs() < 1e-12);
        assert!((quantile(&v, 0.75) - 4.75).abs() < 1e-12);
        assert_eq!(quantile(&[7.0], 0.5), 7.0);
    }

    #[test]
    fn test_outlier_filter_drops_extreme_value() {
        let data = rows("A", &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        let kept = outlier_filter(&data, |r| r.value, |r| r.group.as_str());
        let values: Vec<f64> = kept.iter().filter_map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        // 행 전체 유지
        assert_eq!(kept[4].tag, 4);
    }

    #[test]
    fn test_outlier_filter_small_group_passes_through() {
        let data = rows("A", &[1.0, 2.0, 1000.0]);
        let kept = outlier_filter(&data, |r| r.value, |r| r.group.as_str());
        assert_eq!(kept, data);
    }

    #[test]
    fn test_outlier_filter_groups_are_independent() {
        let mut data = rows("cheap", &[10.0, 11.0, 12.0, 13.0, 14.0]);
        data.extend(rows("pricey", &[1000.0, 1100.0, 1200.0, 1300.0]));
        let kept = outlier_filter(&data, |r| r.value, |r| r.group.as_str());
        assert_eq!(kept.len(), data.len());
    }

    #[test]
    fn test_outlier_filter_drops_missing_values_in_filtered_group() {
        let mut data = rows("A", &[1.0, 2.0, 3.0, 4.0]);
        data.push(Row { group: "A".into(), value: None, tag: 99 });
        let kept = outlier_filter(&data, |r| r.value, |r| r.group.as_str());
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|r| r.value.is_some()));
    }

    #[test]
    fn test_outlier_filter_empty() {
        let data: Vec<Row> = Vec::new();
        assert!(outlier_filter(&data, |r| r.value, |r| r.group.as_str()).is_empty());
    }

    #[test]
    fn test_monthly_bucket_cutoff_and_order() {
        let data = vec![
            ("20241215", "A"),
            ("20250302", "B"),
            ("20250115", "B"),
            ("20250131", "A"),
            ("20250101", "A"),
            ("2025-01-01", "A"),
            ("", "B"),
            ("20250230", "B"),
        ];
        let buckets = monthly_bucket(&data, |r| Some(r.0), |r| r.1, cutoff());
        assert_eq!(
            buckets,
            vec![
                MonthlyCount { month: "2025-01".into(), keyword: "A".into(), count: 2 },
                MonthlyCount { month: "2025-01".into(), keyword: "B".into(), count: 1 },
                MonthlyCount { month: "2025-03".into(), keyword: "B".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_monthly_bucket_excludes_before_cutoff_for_every_keyword() {
        let data = vec![("20241215", "A"), ("20241215", "B")];
        assert!(monthly_bucket(&data, |r| Some(r.0), |r| r.1, cutoff()).is_empty());
    }

    #[test]
    fn test_describe_numeric() {
        let mut data = rows("A", &[1.0, 2.0, 3.0, 4.0]);
        data.extend(rows("B", &[5.0]));
        data.push(Row { group: "B".into(), value: None, tag: 0 });

        let stats = describe_numeric(&data, |r| r.group.as_str(), |r| r.value);
        assert_eq!(stats.len(), 2);

        let a = &stats[0];
        assert_eq!(a.group, "A");
        assert_eq!(a.count, 4);
        assert!((a.mean - 2.5).abs() < 1e-12);
        assert!((a.std.unwrap() - 1.2909944487358056).abs() < 1e-9);
        assert_eq!(a.min, 1.0);
        assert!((a.q1 - 1.75).abs() < 1e-12);
        assert!((a.median - 2.5).abs() < 1e-12);
        assert!((a.q3 - 3.25).abs() < 1e-12);
        assert_eq!(a.max, 4.0);

        let b = &stats[1];
        assert_eq!(b.count, 1);
        assert_eq!(b.std, None);
    }

    #[test]
    fn test_describe_numeric_empty() {
        let data: Vec<Row> = Vec::new();
        assert!(describe_numeric(&data, |r| r.group.as_str(), |r| r.value).is_empty());
    }

    #[test]
    fn test_top_n_skewed_malls() {
        let mut malls: Vec<String> = Vec::new();
        for i in 0..15 {
            // mall_0 15회 ... mall_14 1회
            for _ in 0..(15 - i) {
                malls.push(format!("mall_{}", i));
            }
        }
        let top = top_n(&malls, |m| Some(m.as_str()), 10);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(top[0].category, "mall_0");
        assert!(top.iter().map(|c| c.count).sum::<usize>() <= malls.len());
    }

    #[test]
    fn test_top_n_ties_keep_first_seen() {
        let data = vec!["b", "a", "c", "a", "b", "c"];
        let top = top_n(&data, |s| Some(*s), 2);
        assert_eq!(top[0].category, "b");
        assert_eq!(top[1].category, "a");
    }

    #[test]
    fn test_top_n_skips_missing_category() {
        let data = vec![Some("x"), None, Some("x")];
        let top = top_n(&data, |s| *s, 10);
        assert_eq!(top, vec![CategoryCount { category: "x".into(), count: 2 }]);
    }

    #[test]
    fn test_recent_trend_rows() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        let points = vec![
            TrendPoint { period: d(1), ratio: 1.0, keyword: "B".into() },
            TrendPoint { period: d(2), ratio: 2.0, keyword: "B".into() },
            TrendPoint { period: d(2), ratio: 3.0, keyword: "A".into() },
        ];
        let rows = recent_trend_rows(&points, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].period, rows[0].keyword.as_str()), (d(2), "A"));
        assert_eq!((rows[1].period, rows[1].keyword.as_str()), (d(2), "B"));
    }

    #[test]
    fn test_keyword_palette_cycles() {
        let kws: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let colors = keyword_palette(&kws);
        assert_eq!(colors[0].color, "#3B2A22");
        assert_eq!(colors[3].color, "#3B2A22");
        assert_eq!(colors[1].color, "#6E8F3D");
    }

    #[test]
    fn test_table_rows_use_plain_titles() {
        use crate::models::search::SearchKind;
        use serde_json::json;

        let blog: Vec<SearchItem> = (0..3)
            .map(|i| {
                SearchItem::from_json(
                    SearchKind::Blog,
                    "카다이프",
                    &json!({
                        "title": format!("<b>카다이프</b> &amp; 쿠키 {}", i),
                        "link": format!("https://blog.naver.com/a/{}", i),
                        "bloggername": "쿠키러버",
                        "postdate": "20250214"
                    }),
                )
            })
            .collect();
        let rows = blog_rows(&blog, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "카다이프 & 쿠키 0");
        assert_eq!(rows[1].link, "https://blog.naver.com/a/1");
        assert_eq!(rows[0].post_date, "20250214");
        // 쇼핑 항목은 블로그 표에 들어가지 않음
        assert!(shop_rows(&blog, 10).is_empty());

        let shop = vec![SearchItem::from_json(
            SearchKind::Shop,
            "피스타치오",
            &json!({ "title": "<b>피스타치오</b> 크림", "lprice": "가격문의", "mallName": "네이버" }),
        )];
        let rows = shop_rows(&shop, 500);
        assert_eq!(rows[0].title, "피스타치오 크림");
        assert_eq!(rows[0].low_price, None);
        assert_eq!(rows[0].mall_name, "네이버");
    }

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(parse_compact_date("20250214"), NaiveDate::from_ymd_opt(2025, 2, 14));
        assert_eq!(parse_compact_date("2025021"), None);
        assert_eq!(parse_compact_date("20251301"), None);
        assert_eq!(parse_compact_date("２0250214"), None);
    }
}
