use super::{failure_message, ActionError};
use crate::api::PollApi;
use crate::sync::{PollSync, PollView};
use log::info;

// Cast a vote. Local vote state only moves once the service accepts it,
// and a confirmed vote is followed by an immediate refresh.
pub async fn handle_vote<A: PollApi, V: PollView>(
    sync: &mut PollSync<A, V>,
    item_id: &str,
) -> Result<(), ActionError> {
    info!("Submitting vote for item {} in poll {}", item_id, sync.poll_id());

    let outcome = sync
        .api()
        .submit_vote(sync.poll_id(), item_id, sync.user_id())
        .await;

    match outcome {
        Ok(()) => {
            sync.confirm_vote(item_id);
            sync.run_cycle().await;
            Ok(())
        }
        Err(e) => {
            sync.view_mut().show_error(&failure_message("voting", &e));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{PollSnapshot, VoteItem};
    use crate::sync::testing::*;

    #[tokio::test]
    async fn confirmed_vote_marks_item_and_refreshes() {
        let mut sync = new_sync();
        sync.api().push_fetch(Ok(cats_and_dogs()));

        handle_vote(&mut sync, "a").await.unwrap();

        assert_eq!(sync.local_vote().current(), Some("a"));
        assert_eq!(
            sync.api().calls(),
            vec![
                Call::Vote {
                    poll_id: "p1".into(),
                    item_id: "a".into(),
                    user_id: "u1".into(),
                },
                Call::Fetch("p1".into()),
            ]
        );
        let rows = sync.view().list.as_ref().unwrap().rows().to_vec();
        assert!(rows[0].voted);
        assert!(!rows[1].voted);
    }

    #[tokio::test]
    async fn vote_mark_survives_later_snapshots() {
        let mut sync = new_sync();
        sync.api().push_fetch(Ok(cats_and_dogs()));
        handle_vote(&mut sync, "a").await.unwrap();

        // Server now reports zero votes for "a"; the mark still comes from local state
        sync.api().push_fetch(Ok(PollSnapshot::new(
            vec![
                VoteItem { id: "b".into(), text: "Dogs".into(), votes: 10 },
                VoteItem { id: "a".into(), text: "Cats".into(), votes: 0 },
            ],
            10,
        )));
        sync.run_cycle().await;

        let rows = sync.view().list.as_ref().unwrap().rows().to_vec();
        assert_eq!(rows[1].id, "a");
        assert!(rows[1].voted);
        assert!(!rows[0].voted);
    }

    #[tokio::test]
    async fn rejected_vote_leaves_local_state_alone() {
        let mut sync = new_sync();
        sync.api().push_fetch(Ok(cats_and_dogs()));
        handle_vote(&mut sync, "a").await.unwrap();

        sync.api().push_write(Err(ApiError::Rejected {
            status: 400,
            detail: "Vote failed".into(),
        }));
        let result = handle_vote(&mut sync, "b").await;

        assert!(matches!(result, Err(ActionError::Api(ApiError::Rejected { .. }))));
        assert_eq!(sync.local_vote().current(), Some("a"));
        assert_eq!(sync.view().errors, vec!["Error voting: Vote failed".to_string()]);

        // No out-of-band refresh after a failure
        let fetches = sync
            .api()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Fetch(_)))
            .count();
        assert_eq!(fetches, 1);

        sync.api().push_fetch(Ok(cats_and_dogs()));
        sync.run_cycle().await;
        let rows = sync.view().list.as_ref().unwrap().rows().to_vec();
        assert!(rows[0].voted);
        assert!(!rows[1].voted);
    }

    #[tokio::test]
    async fn vote_stays_confirmed_when_follow_up_fetch_fails() {
        let mut sync = new_sync();

        handle_vote(&mut sync, "b").await.unwrap();

        assert_eq!(sync.local_vote().current(), Some("b"));
        assert!(sync.view().list.is_none());
    }
}
