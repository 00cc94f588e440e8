use crate::{
    api::{parse_base_url, to_query_pairs, ParamValue, ToParams},
    codeforces::{
        model::{ApiStatus, Contest, Envelope, Problemset, RatingChange, Submission, User},
        request::{
            ApiMethod, ContestListRequest, ProblemsetProblemsRequest, UserInfoRequest,
            UserRatingRequest, UserStatusRequest,
        },
    },
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://codeforces.com/api";

type Result<T> = std::result::Result<T, CodeforcesError>;

#[derive(Debug, Error)]
pub enum CodeforcesError {
    #[error("failed to request to Codeforces API: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to deserialize response envelope: {0}")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid Codeforces API url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("{0}")]
    ApiError(String),
    #[error("No result returned from API")]
    EmptyResultError,
}

impl CodeforcesError {
    /// Whether the call itself failed, as opposed to the API answering with a failure.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CodeforcesError::RequestError(_)
                | CodeforcesError::DeserializeError(_)
                | CodeforcesError::InvalidUrlError(_)
        )
    }
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T> {
        match self.status {
            ApiStatus::Failed => Err(CodeforcesError::ApiError(
                self.comment
                    .filter(|comment| !comment.is_empty())
                    .unwrap_or_else(|| String::from("Codeforces API Error")),
            )),
            ApiStatus::Ok => self.result.ok_or(CodeforcesError::EmptyResultError),
        }
    }
}

/// Decode a response body as an envelope and unwrap its result.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    envelope.into_result()
}

#[async_trait]
pub trait CodeforcesApi: Send + Sync {
    async fn user_info(&self, handles: &[String]) -> Result<Vec<User>>;
    async fn user_rating(&self, handle: &str) -> Result<Vec<RatingChange>>;
    async fn user_status(&self, handle: &str, count: u32) -> Result<Vec<Submission>>;
    async fn contest_list(&self, gym: bool) -> Result<Vec<Contest>>;
    async fn problemset_problems(&self) -> Result<Problemset>;
}

#[derive(Debug, Clone)]
pub struct CodeforcesClient {
    base_url: Url,
    client: Client,
}

impl CodeforcesClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().gzip(true).build()?;

        Ok(CodeforcesClient { base_url, client })
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().gzip(true).timeout(timeout).build()?;

        Ok(CodeforcesClient { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call a typed API method.
    pub async fn call<R>(&self, request: &R) -> Result<R::Response>
    where
        R: ApiMethod + Sync,
    {
        let params = to_query_pairs(&request.to_params());
        self.request(R::METHOD, &params).await
    }

    /// Call an API method by name with untyped parameters and return the raw result.
    pub async fn call_raw(
        &self,
        method: &str,
        params: &[(impl ToString + Sync, ParamValue)],
    ) -> Result<Value> {
        let params = to_query_pairs(params);
        self.request(method, &params).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        match self.send(method, params).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!("API call failed for {}: {}", method, e);
                Err(e)
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = self.base_url.join(method)?;
        tracing::debug!("GET {} with {:?}", url, params);

        let res = self.client.get(url).query(params).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        // Failed calls come back as 400 with a FAILED envelope, so the body is
        // decoded regardless of the status code.
        let result = unwrap_envelope::<T>(&body);
        if let Err(CodeforcesError::DeserializeError(_)) = &result {
            if !status.is_success() {
                tracing::warn!("{} answered {} with a non-envelope body", method, status);
            }
        }
        result
    }
}

#[async_trait]
impl CodeforcesApi for CodeforcesClient {
    async fn user_info(&self, handles: &[String]) -> Result<Vec<User>> {
        self.call(&UserInfoRequest {
            handles: handles.to_vec(),
        })
        .await
    }

    async fn user_rating(&self, handle: &str) -> Result<Vec<RatingChange>> {
        self.call(&UserRatingRequest {
            handle: handle.to_string(),
        })
        .await
    }

    async fn user_status(&self, handle: &str, count: u32) -> Result<Vec<Submission>> {
        self.call(&UserStatusRequest::recent(handle, count)).await
    }

    async fn contest_list(&self, gym: bool) -> Result<Vec<Contest>> {
        self.call(&ContestListRequest { gym }).await
    }

    async fn problemset_problems(&self) -> Result<Problemset> {
        self.call(&ProblemsetProblemsRequest::default()).await
    }
}
