use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub votes: u64,
}

// Poll metadata as reported alongside the results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// Body of GET /api/polls/{id}/results
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPayload {
    #[serde(default)]
    pub poll: Option<PollInfo>,
    pub items: Vec<VoteItem>,
    pub total_votes: u64,
}

// One complete view of a poll, replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSnapshot {
    pub poll: Option<PollInfo>,
    pub items: Vec<VoteItem>,
    pub total_votes: u64,
    pub fetched_at: DateTime<Utc>,
}

impl PollSnapshot {
    pub fn new(items: Vec<VoteItem>, total_votes: u64) -> Self {
        Self {
            poll: None,
            items,
            total_votes,
            fetched_at: Utc::now(),
        }
    }

    pub fn from_payload(payload: ResultsPayload, fetched_at: DateTime<Utc>) -> Self {
        Self {
            poll: payload.poll,
            items: payload.items,
            total_votes: payload.total_votes,
            fetched_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Largest vote count across items, floored at 1 so it is always a safe divisor.
    pub fn max_votes(&self) -> u64 {
        self.items.iter().map(|item| item.votes).max().unwrap_or(0).max(1)
    }
}

// The item this client last confirmed a vote for. Only a successful vote write moves it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalVoteState {
    current_vote_item_id: Option<String>,
}

impl LocalVoteState {
    pub fn current(&self) -> Option<&str> {
        self.current_vote_item_id.as_deref()
    }

    pub fn is_current(&self, item_id: &str) -> bool {
        self.current() == Some(item_id)
    }

    pub(crate) fn confirm(&mut self, item_id: &str) {
        self.current_vote_item_id = Some(item_id.to_string());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddItemRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteRequest {
    pub item_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddItemResponse {
    #[serde(default)]
    pub success: bool,
    pub item: VoteItem,
}

// FastAPI-style error body; `detail` is a string for HTTPException, a list for validation errors
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}
