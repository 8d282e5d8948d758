use crate::models::{
    AddItemRequest, AddItemResponse, ErrorBody, PollSnapshot, ResultsPayload, VoteItem, VoteRequest,
};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::{Client, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl ApiError {
    // The service-provided message, if the service answered at all.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

// The poll service as seen by the client. Reads never retry; a failure means
// "nothing new this cycle".
#[async_trait]
pub trait PollApi: Send + Sync {
    async fn fetch_results(&self, poll_id: &str) -> Result<PollSnapshot, ApiError>;

    async fn submit_vote(&self, poll_id: &str, item_id: &str, user_id: &str) -> Result<(), ApiError>;

    async fn submit_item(&self, poll_id: &str, text: &str) -> Result<VoteItem, ApiError>;
}

pub struct HttpPollApi {
    client: Client,
    base_url: String,
}

impl HttpPollApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn poll_url(&self, poll_id: &str, path: &str) -> String {
        format!("{}/api/polls/{}/{}", self.base_url, poll_id, path)
    }
}

// Turn a non-success status into `Rejected`, pulling `detail` out of the body when possible
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.message(),
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl PollApi for HttpPollApi {
    async fn fetch_results(&self, poll_id: &str) -> Result<PollSnapshot, ApiError> {
        let url = self.poll_url(poll_id, "results");
        debug!("Fetching results from {}", url);

        let response = check_status(self.client.get(&url).send().await?).await?;
        let payload: ResultsPayload = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        Ok(PollSnapshot::from_payload(payload, Utc::now()))
    }

    async fn submit_vote(&self, poll_id: &str, item_id: &str, user_id: &str) -> Result<(), ApiError> {
        let body = VoteRequest {
            item_id: item_id.to_string(),
            user_id: user_id.to_string(),
        };
        let response = self
            .client
            .post(self.poll_url(poll_id, "vote"))
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn submit_item(&self, poll_id: &str, text: &str) -> Result<VoteItem, ApiError> {
        let body = AddItemRequest {
            text: text.to_string(),
        };
        let response = self
            .client
            .post(self.poll_url(poll_id, "items"))
            .json(&body)
            .send()
            .await?;
        let confirmation: AddItemResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        Ok(confirmation.item)
    }
}
