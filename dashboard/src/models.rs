use serde::{Deserialize, Serialize};

/// Labels for `views_history` and `revenue_history`, oldest first.
pub const MONTH_LABELS: [&str; 7] = [
    "6 months ago",
    "5 months ago",
    "4 months ago",
    "3 months ago",
    "2 months ago",
    "1 month ago",
    "This month",
];

/// Labels for `audience_retention`, one per decile of video duration.
pub const RETENTION_LABELS: [&str; 10] = [
    "10%", "20%", "30%", "40%", "50%", "60%", "70%", "80%", "90%", "100%",
];

/// What the user typed into the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelQuery {
    ChannelId(String),
    Name(String),
}

impl ChannelQuery {
    pub const ID_PREFIX: &'static str = "UC";
    /// Literal ids must be strictly longer than this.
    pub const ID_MIN_LEN: usize = 20;

    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.starts_with(Self::ID_PREFIX) && input.chars().count() > Self::ID_MIN_LEN {
            ChannelQuery::ChannelId(input.to_string())
        } else {
            ChannelQuery::Name(input.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub duration: String,
    pub thumbnail: Option<String>,
    pub published_at: String,
    /// Placeholder click-through rate in percent, one decimal.
    pub ctr: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub subscribers: u64,
    pub total_views: u64,
    pub total_videos: u64,
    pub total_likes: u64,
    /// Minutes.
    pub avg_view_duration: f64,
    pub estimated_revenue: f64,
    pub top_videos: Vec<VideoSummary>,
    pub views_history: Vec<u64>,
    pub revenue_history: Vec<f64>,
    pub audience_retention: Vec<u32>,
    pub category_breakdown: Vec<CategoryShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub growth: Vec<String>,
    pub attention: Vec<String>,
}

/// Everything the presentation layer needs for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub channel: ChannelSummary,
    pub videos: Vec<VideoSummary>,
    pub recommendations: Recommendations,
}
