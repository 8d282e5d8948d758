use crate::api::PollApi;
use crate::models::{LocalVoteState, PollInfo, PollSnapshot};
use crate::render::{layout_chart, render_list, ChartLayout, ListView};
use log::{debug, info};

// Whatever hosts the poll page: item list, vote total, chart and user alerts.
pub trait PollView {
    fn render_header(&mut self, _poll: &PollInfo) {}
    fn render_items(&mut self, list: &ListView);
    fn render_total(&mut self, total_votes: u64);
    fn render_chart(&mut self, chart: &ChartLayout);
    fn show_error(&mut self, message: &str);
    fn clear_item_input(&mut self);
    // Width and height of the chart surface.
    fn chart_size(&self) -> (f64, f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    Skipped,
}

// Owns the snapshot, the local vote and the view for one poll.
pub struct PollSync<A, V> {
    api: A,
    view: V,
    poll_id: String,
    user_id: String,
    snapshot: Option<PollSnapshot>,
    local_vote: LocalVoteState,
    cycles: u64,
}

impl<A: PollApi, V: PollView> PollSync<A, V> {
    pub fn new(api: A, view: V, poll_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            view,
            poll_id: poll_id.into(),
            user_id: user_id.into(),
            snapshot: None,
            local_vote: LocalVoteState::default(),
            cycles: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn poll_id(&self) -> &str {
        &self.poll_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn snapshot(&self) -> Option<&PollSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn local_vote(&self) -> &LocalVoteState {
        &self.local_vote
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub(crate) fn confirm_vote(&mut self, item_id: &str) {
        info!("Vote for item {} in poll {} confirmed", item_id, self.poll_id);
        self.local_vote.confirm(item_id);
    }

    // Fetch then render. A failed fetch leaves both the snapshot and the view untouched.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        match self.api.fetch_results(&self.poll_id).await {
            Ok(snapshot) => {
                debug!(
                    "Cycle {}: {} item(s), {} vote(s) at {}",
                    self.cycles,
                    snapshot.items.len(),
                    snapshot.total_votes,
                    snapshot.fetched_at.to_rfc3339()
                );
                self.snapshot = Some(snapshot);
                self.render();
                CycleOutcome::Rendered
            }
            Err(e) => {
                debug!("Cycle {}: refresh of poll {} skipped: {}", self.cycles, self.poll_id, e);
                CycleOutcome::Skipped
            }
        }
    }

    // Redraw list, total and chart from the current snapshot, if any.
    pub fn render(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };

        let list = render_list(snapshot, &self.local_vote);
        let (width, height) = self.view.chart_size();
        let chart = layout_chart(snapshot, width, height);

        if let Some(poll) = &snapshot.poll {
            self.view.render_header(poll);
        }
        self.view.render_items(&list);
        self.view.render_total(snapshot.total_votes);
        self.view.render_chart(&chart);
    }
}
