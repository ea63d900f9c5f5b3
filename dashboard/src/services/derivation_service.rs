use crate::error::Result;
use crate::models::{CategoryShare, ChannelSummary, VideoSummary};
use crate::random::RandomSource;
use crate::utils::{format_iso8601_date, parse_iso8601_duration};
use serde_json::Value;

/// Dollars per 1000 views.
pub const AVERAGE_CPM: f64 = 2.0;
/// Share of views assumed to turn into likes.
pub const LIKES_PER_VIEW: f64 = 0.04;
/// Months of views the monthly trend is scaled from.
pub const VIEWS_HISTORY_DIVISOR: f64 = 36.0;
pub const VIEWS_HISTORY_MONTHS: usize = 7;
pub const RETENTION_POINTS: usize = 10;

pub const OTHER_CATEGORY: &str = "Other";

/// Keyword lists in priority order; the first list with a hit wins.
pub const CATEGORY_KEYWORDS: [(&str, &[&str]); 5] = [
    ("Reviews", &["review", "vs", "comparison", "versus", "compared"]),
    ("Tutorials", &["how to", "tutorial", "guide", "learn", "tips"]),
    ("Vlogs", &["vlog", "day in", "my life", "behind the scenes"]),
    (
        "Gaming",
        &["gameplay", "game", "playing", "playthrough", "minecraft", "fortnite"],
    ),
    ("Tech", &["unboxing", "tech", "smartphone", "iphone", "android", "gadget"]),
];

pub fn estimate_revenue(views: f64) -> f64 {
    (views / 1000.0) * AVERAGE_CPM
}

/// `count` values around `base_value`, each scaled by a factor in [0.9, 1.2).
pub fn mock_time_series(base_value: f64, count: usize, rng: &mut impl RandomSource) -> Vec<u64> {
    (0..count)
        .map(|_| {
            let factor = rng.uniform(0.9, 1.2);
            (base_value * factor).round().max(0.0) as u64
        })
        .collect()
}

/// Percentage of viewers left at each tenth of a video. Drops faster early on.
pub fn mock_retention_curve() -> Vec<u32> {
    let mut value = 100.0_f64;
    let mut curve = Vec::with_capacity(RETENTION_POINTS);
    curve.push(value as u32);

    for i in 1..RETENTION_POINTS {
        let drop_factor = 0.97 - (0.02 * (RETENTION_POINTS - i) as f64 / 10.0);
        value = (value * drop_factor).round();
        curve.push(value as u32);
    }

    curve
}

fn categorize(title: &str) -> &'static str {
    let title = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map_or(OTHER_CATEGORY, |(category, _)| *category)
}

/// Share of titles per category, in fixed category order with `Other` last.
/// Shares that round to 0% are left out, so the total may not be exactly 100.
pub fn classify_categories<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<CategoryShare> {
    let categories: Vec<&str> = CATEGORY_KEYWORDS
        .iter()
        .map(|(category, _)| *category)
        .chain(std::iter::once(OTHER_CATEGORY))
        .collect();
    let mut counts = vec![0usize; categories.len()];

    let mut total = 0usize;
    for title in titles {
        let category = categorize(title);
        if let Some(index) = categories.iter().position(|c| *c == category) {
            counts[index] += 1;
        }
        total += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    categories
        .iter()
        .zip(counts)
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            percentage: ((count as f64 / total as f64) * 100.0).round() as u32,
        })
        .filter(|share| share.percentage > 0)
        .collect()
}

/// Statistics arrive as decimal strings; hidden or disabled counters are missing.
fn parse_count(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.parse().unwrap_or(0),
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn medium_thumbnail(snippet: &Value) -> Option<String> {
    snippet["thumbnails"]["medium"]["url"]
        .as_str()
        .map(String::from)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Builds one table row from a raw `videos` record. Draws one sample for the CTR.
pub fn summarize_video(record: &Value, rng: &mut impl RandomSource) -> Result<VideoSummary> {
    let snippet = &record["snippet"];
    let views = parse_count(&record["statistics"]["viewCount"]);
    let duration =
        parse_iso8601_duration(record["contentDetails"]["duration"].as_str().unwrap_or(""))?;

    Ok(VideoSummary {
        id: record["id"].as_str().unwrap_or("").to_string(),
        title: snippet["title"].as_str().unwrap_or("").to_string(),
        views,
        likes: parse_count(&record["statistics"]["likeCount"]),
        duration,
        thumbnail: medium_thumbnail(snippet),
        published_at: format_iso8601_date(snippet["publishedAt"].as_str().unwrap_or("")),
        ctr: round_to_tenth(rng.uniform(5.0, 15.0)),
        revenue: estimate_revenue(views as f64),
    })
}

/// Orders rows by view count, most viewed first.
pub fn sort_by_views(videos: &mut [VideoSummary]) {
    videos.sort_by(|a, b| b.views.cmp(&a.views));
}

/// Channel-level aggregates from a raw `channels` record.
///
/// `video_refs` are the search results used for the category mix. Draws seven
/// samples for the views trend, then one for the average view duration.
pub fn summarize_channel(
    record: &Value,
    video_refs: &[Value],
    top_videos: Vec<VideoSummary>,
    rng: &mut impl RandomSource,
) -> ChannelSummary {
    let snippet = &record["snippet"];
    let stats = &record["statistics"];
    let total_views = parse_count(&stats["viewCount"]);

    let views_history = mock_time_series(
        total_views as f64 / VIEWS_HISTORY_DIVISOR,
        VIEWS_HISTORY_MONTHS,
        rng,
    );
    let revenue_history = views_history
        .iter()
        .map(|views| estimate_revenue(*views as f64))
        .collect();
    let avg_view_duration = rng.uniform(7.0, 15.0);

    let category_breakdown = classify_categories(
        video_refs
            .iter()
            .map(|video| video["snippet"]["title"].as_str().unwrap_or("")),
    );

    ChannelSummary {
        id: record["id"].as_str().unwrap_or("").to_string(),
        name: snippet["title"].as_str().unwrap_or("").to_string(),
        description: snippet["description"].as_str().unwrap_or("").to_string(),
        thumbnail: medium_thumbnail(snippet),
        subscribers: parse_count(&stats["subscriberCount"]),
        total_views,
        total_videos: parse_count(&stats["videoCount"]),
        total_likes: (total_views as f64 * LIKES_PER_VIEW).round() as u64,
        avg_view_duration,
        estimated_revenue: estimate_revenue(total_views as f64),
        top_videos,
        views_history,
        revenue_history,
        audience_retention: mock_retention_curve(),
        category_breakdown,
    }
}
