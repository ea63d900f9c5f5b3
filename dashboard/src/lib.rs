//! Channel analytics for the Statify dashboard.
//!
//! Fetches a channel and its most viewed videos from the YouTube Data API and
//! derives the view-model the dashboard renders. Most secondary metrics are
//! rough estimates, not real analytics.

pub mod config;
pub mod error;
pub mod models;
pub mod random;
pub mod services;
pub mod session;
pub mod utils;

pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use models::{ChannelQuery, ChannelSummary, DashboardView, VideoSummary};
pub use services::query_service::QueryPipeline;
pub use services::youtube_service::{VideoPlatformApi, YouTubeClient};
pub use session::{DashboardSession, QueryState};
