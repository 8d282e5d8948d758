mod item;
mod vote;

pub use item::handle_add_item;
pub use vote::handle_vote;

use crate::api::{ApiError, PollApi};
use crate::sync::{PollSync, PollView};
use log::{info, warn};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Item text cannot be empty")]
    EmptyItemText,
}

// Something the user asked for outside the refresh schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Vote(String),
    AddItem(String),
    Refresh,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("empty command")]
    Empty,
    #[error("usage: vote <item-id>")]
    MissingItemId,
    #[error("usage: add <text>")]
    MissingText,
    #[error("unknown command: {0}")]
    Unknown(String),
}

// Accepts `vote <id>`, `add <text>` and `refresh`
impl FromStr for UserAction {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => Err(ParseActionError::Empty),
            "vote" if rest.is_empty() => Err(ParseActionError::MissingItemId),
            "vote" => Ok(UserAction::Vote(rest.to_string())),
            "add" if rest.is_empty() => Err(ParseActionError::MissingText),
            "add" => Ok(UserAction::AddItem(rest.to_string())),
            "refresh" => Ok(UserAction::Refresh),
            other => Err(ParseActionError::Unknown(other.to_string())),
        }
    }
}

pub async fn handle_action<A: PollApi, V: PollView>(
    sync: &mut PollSync<A, V>,
    action: UserAction,
) -> Result<(), ActionError> {
    info!("Handling action {:?} for poll {}", action, sync.poll_id());
    let result = match action {
        UserAction::Vote(item_id) => handle_vote(sync, &item_id).await,
        UserAction::AddItem(text) => handle_add_item(sync, &text).await,
        UserAction::Refresh => {
            sync.run_cycle().await;
            Ok(())
        }
    };

    if let Err(e) = &result {
        warn!("Action on poll {} failed: {}", sync.poll_id(), e);
    }
    result
}

// Message shown to the user for a failed write
fn failure_message(action: &str, error: &ApiError) -> String {
    match error.detail() {
        Some(detail) => format!("Error {}: {}", action, detail),
        None => format!("Error {}. Please try again.", action),
    }
}
