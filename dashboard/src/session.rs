use crate::error::{DashboardError, Result};
use crate::models::DashboardView;
use crate::random::RandomSource;
use crate::services::query_service::QueryPipeline;
use crate::services::youtube_service::VideoPlatformApi;
use log::{error, warn};

/// What the dashboard currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Ready(DashboardView),
    Failed(String),
}

/// Ticket handed out by [`DashboardSession::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionId(u64);

pub fn failure_message(err: &DashboardError) -> String {
    format!("Error fetching data: {err}. Try using a channel name like \"MKBHD\" or \"MrBeast\".")
}

/// Holds the state of the dashboard across submissions.
#[derive(Debug, Default)]
pub struct DashboardSession {
    state: QueryState,
    latest: u64,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Callers should not start another submission while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    pub fn view(&self) -> Option<&DashboardView> {
        match &self.state {
            QueryState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Switches to `Loading` and drops whatever was shown before.
    pub fn begin(&mut self) -> SubmissionId {
        self.latest += 1;
        self.state = QueryState::Loading;
        SubmissionId(self.latest)
    }

    /// Applies the outcome of a submission. Returns `false` and leaves the state
    /// untouched when `id` is not the latest pending submission.
    pub fn finish(&mut self, id: SubmissionId, result: Result<DashboardView>) -> bool {
        if id.0 != self.latest || !self.is_loading() {
            warn!("Discarding result of stale submission #{}", id.0);
            return false;
        }

        self.state = match result {
            Ok(view) => QueryState::Ready(view),
            Err(e) => {
                error!("Submission #{} failed: {e}", id.0);
                QueryState::Failed(failure_message(&e))
            }
        };
        true
    }

    pub async fn submit<A, R>(&mut self, pipeline: &mut QueryPipeline<A, R>, query: &str) -> &QueryState
    where
        A: VideoPlatformApi,
        R: RandomSource,
    {
        let id = self.begin();
        let result = pipeline.run(query).await;
        self.finish(id, result);
        &self.state
    }
}
