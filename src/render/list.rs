use crate::models::{LocalVoteState, PollSnapshot};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    static ref HTML_SPECIAL: Regex = Regex::new(r#"[&<>"']"#).expect("HTML escape pattern is valid");
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    HTML_SPECIAL.replace_all(text, |caps: &Captures| match &caps[0] {
        "&" => "&amp;",
        "<" => "&lt;",
        ">" => "&gt;",
        "\"" => "&quot;",
        _ => "&#039;",
    })
}

// One displayed item with its vote control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: String,
    pub text: String,
    pub votes: u64,
    pub voted: bool,
}

impl ItemRow {
    pub fn button_label(&self) -> &'static str {
        if self.voted { "Voted ✓" } else { "Vote" }
    }

    pub fn button_class(&self) -> &'static str {
        if self.voted {
            "btn btn-vote btn-voted"
        } else {
            "btn btn-vote"
        }
    }

    pub fn votes_label(&self) -> String {
        format!("{} votes", self.votes)
    }

    pub fn to_html(&self) -> String {
        let id = escape_html(&self.id);
        format!(
            concat!(
                r#"<div class="vote-item" data-item-id="{id}">"#,
                r#"<div class="item-content">"#,
                r#"<span class="item-text">{text}</span>"#,
                r#"<span class="vote-count">{votes}</span>"#,
                "</div>",
                r#"<button class="{class}" data-item-id="{id}">{label}</button>"#,
                "</div>"
            ),
            id = id,
            text = escape_html(&self.text),
            votes = self.votes_label(),
            class = self.button_class(),
            label = self.button_label(),
        )
    }
}

// The rebuilt item list. `Empty` means the placeholder is shown and the list container hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Items(Vec<ItemRow>),
}

impl ListView {
    pub fn rows(&self) -> &[ItemRow] {
        match self {
            ListView::Empty => &[],
            ListView::Items(rows) => rows,
        }
    }

    pub fn shows_placeholder(&self) -> bool {
        matches!(self, ListView::Empty)
    }

    pub fn to_html(&self) -> String {
        self.rows().iter().map(ItemRow::to_html).collect()
    }
}

// Rebuild the whole list from a snapshot. The "voted" mark only ever comes from local state.
pub fn render_list(snapshot: &PollSnapshot, local_vote: &LocalVoteState) -> ListView {
    if snapshot.is_empty() {
        return ListView::Empty;
    }

    let rows = snapshot
        .items
        .iter()
        .map(|item| ItemRow {
            id: item.id.clone(),
            text: item.text.clone(),
            votes: item.votes,
            voted: local_vote.is_current(&item.id),
        })
        .collect();
    ListView::Items(rows)
}
