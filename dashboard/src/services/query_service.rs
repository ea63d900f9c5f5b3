use crate::error::Result;
use crate::models::{ChannelQuery, DashboardView};
use crate::random::{RandomSource, ThreadRandom};
use crate::services::derivation_service::{sort_by_views, summarize_channel, summarize_video};
use crate::services::recommendation_service::build_recommendations;
use crate::services::youtube_service::VideoPlatformApi;
use log::{debug, info};

/// Number of search results whose full details are fetched.
pub const TOP_VIDEO_COUNT: usize = 10;

/// Runs the API calls and derivations behind one search submission.
pub struct QueryPipeline<A, R = ThreadRandom> {
    api: A,
    rng: R,
}

impl<A: VideoPlatformApi> QueryPipeline<A, ThreadRandom> {
    pub fn new(api: A) -> Self {
        Self::with_random(api, ThreadRandom)
    }
}

impl<A: VideoPlatformApi, R: RandomSource> QueryPipeline<A, R> {
    pub fn with_random(api: A, rng: R) -> Self {
        Self { api, rng }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Calls are strictly sequential; the first failure aborts the run.
    pub async fn run(&mut self, query: &str) -> Result<DashboardView> {
        let channel_id = match ChannelQuery::parse(query) {
            ChannelQuery::ChannelId(id) => {
                debug!("Treating {id} as a channel id");
                id
            }
            ChannelQuery::Name(name) => {
                let id = self.api.resolve_channel_id(&name).await?;
                debug!("Resolved \"{name}\" to {id}");
                id
            }
        };

        let details = self.api.fetch_channel_details(&channel_id).await?;
        let video_refs = self.api.fetch_channel_videos(&channel_id).await?;

        let top_ids: Vec<String> = video_refs
            .iter()
            .take(TOP_VIDEO_COUNT)
            .filter_map(|video| video["id"]["videoId"].as_str().map(String::from))
            .collect();
        let video_details = self.api.fetch_video_details(&top_ids).await?;

        let mut videos = video_details
            .iter()
            .map(|record| summarize_video(record, &mut self.rng))
            .collect::<Result<Vec<_>>>()?;
        sort_by_views(&mut videos);

        let channel = summarize_channel(&details, &video_refs, videos.clone(), &mut self.rng);
        let recommendations = build_recommendations(&channel, &videos);

        info!(
            "Built dashboard for {} ({}): {} videos searched, {} detailed",
            channel.name,
            channel.id,
            video_refs.len(),
            videos.len()
        );

        Ok(DashboardView {
            channel,
            videos,
            recommendations,
        })
    }
}
