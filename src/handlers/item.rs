use super::{failure_message, ActionError};
use crate::api::PollApi;
use crate::sync::{PollSync, PollView};
use log::info;

pub async fn handle_add_item<A: PollApi, V: PollView>(
    sync: &mut PollSync<A, V>,
    text: &str,
) -> Result<(), ActionError> {
    let text = text.trim();
    if text.is_empty() {
        sync.view_mut().show_error(&ActionError::EmptyItemText.to_string());
        return Err(ActionError::EmptyItemText);
    }

    let outcome = sync.api().submit_item(sync.poll_id(), text).await;
    match outcome {
        Ok(item) => {
            info!("Added item {} ({}) to poll {}", item.id, item.text, sync.poll_id());
            sync.view_mut().clear_item_input();
            sync.run_cycle().await;
            Ok(())
        }
        Err(e) => {
            // input is left as typed so the user can correct it
            sync.view_mut().show_error(&failure_message("adding item", &e));
            Err(e.into())
        }
    }
}
