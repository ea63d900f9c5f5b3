use crate::models::{ChannelSummary, Recommendations, VideoSummary};

/// Retention below this percentage counts as a drop-off.
const RETENTION_THRESHOLD: u32 = 70;
const LIKE_RATIO_SAMPLE: usize = 3;

/// Mean like ratio in percent over the first three videos, skipping any without views.
fn top_like_ratio(videos: &[VideoSummary]) -> Option<f64> {
    let ratios: Vec<f64> = videos
        .iter()
        .take(LIKE_RATIO_SAMPLE)
        .filter(|video| video.views > 0)
        .map(|video| video.likes as f64 / video.views as f64 * 100.0)
        .collect();

    if ratios.is_empty() {
        None
    } else {
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
    }
}

pub fn build_recommendations(channel: &ChannelSummary, videos: &[VideoSummary]) -> Recommendations {
    let mut growth = vec![format!(
        "Videos averaging {} minutes have the highest engagement",
        channel.avg_view_duration.round()
    )];
    if let Some(first) = channel.category_breakdown.first() {
        growth.push(format!(
            "{} content performs well - consider making more",
            first.category
        ));
    }
    if let Some(ratio) = top_like_ratio(videos) {
        growth.push(format!(
            "Top videos average {}% like ratio - aim for this benchmark",
            ratio.round()
        ));
    }

    let mut attention = Vec::new();
    if let Some(index) = channel
        .audience_retention
        .iter()
        .position(|value| *value < RETENTION_THRESHOLD)
    {
        attention.push(format!(
            "Est. audience retention drops after {}% of video duration",
            (index + 1) * 10
        ));
    }
    if let Some(last) = channel.category_breakdown.last() {
        attention.push(format!(
            "{} videos have lower performance - review strategy",
            last.category
        ));
    }
    if channel.total_views > 0 {
        let per_thousand = channel.estimated_revenue / channel.total_views as f64 * 1000.0;
        attention.push(format!(
            "Est. revenue per view is ${per_thousand:.2} per 1000 views - industry average is $2.00"
        ));
    }

    Recommendations { growth, attention }
}
