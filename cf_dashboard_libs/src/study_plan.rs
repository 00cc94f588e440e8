use crate::{
    api::parse_base_url,
    codeforces::{
        model::{Submission, User},
        CodeforcesApi,
    },
    dashboard::DashboardError,
};
use async_trait::async_trait;
use itertools::Itertools;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const STUDY_PLAN_SUBMISSIONS: u32 = 50;
pub const MAX_WEAK_TAGS: usize = 5;

pub const MISSING_KEY_MESSAGE: &str =
    "Please configure your Gemini API Key in the environment variables to use this feature.";
pub const EMPTY_PLAN_MESSAGE: &str = "Could not generate study plan.";
pub const SERVICE_FAILURE_MESSAGE: &str = "Failed to contact AI service. Please try again later.";

const FALLBACK_WEAK_TAGS: &str = "General implementation";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to request to text generation service: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("invalid text generation service url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("unexpected error: {0}")]
    UnexpectedError(String),
}

/// Free-text generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`. `None` when the service answered without text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, GenerateError>;
}

/// Per-tag counts of accepted and non-accepted submissions, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagTally {
    pub strong: Vec<(String, usize)>,
    pub weak: Vec<(String, usize)>,
}

fn bump(counts: &mut Vec<(String, usize)>, tag: &str) {
    match counts.iter_mut().find(|(name, _)| name == tag) {
        Some((_, count)) => *count += 1,
        None => counts.push((tag.to_string(), 1)),
    }
}

pub fn tally_tags(submissions: &[Submission]) -> TagTally {
    let mut tally = TagTally::default();
    for submission in submissions {
        let counts = if submission.is_accepted() {
            &mut tally.strong
        } else {
            &mut tally.weak
        };
        for tag in submission.problem.tags.iter() {
            bump(counts, tag);
        }
    }
    tally
}

impl TagTally {
    /// Most frequent weak tags, ties kept in first-seen order.
    pub fn top_weak(&self, limit: usize) -> Vec<&str> {
        self.weak
            .iter()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .take(limit)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }
}

pub fn weak_tags_summary(submissions: &[Submission]) -> String {
    let tally = tally_tags(submissions);
    let weak = tally.top_weak(MAX_WEAK_TAGS);
    if weak.is_empty() {
        String::from(FALLBACK_WEAK_TAGS)
    } else {
        weak.join(", ")
    }
}

pub fn build_prompt(user: &User, weak_tags: &str) -> String {
    let rating = user.rating.unwrap_or(0);
    let rank = user.rank.as_deref().unwrap_or("unrated");

    format!(
        "I am a competitive programmer on Codeforces.\n\
         My handle is {handle}.\n\
         My current rating is {rating} ({rank}).\n\
         \n\
         Based on my recent history:\n\
         - I often struggle with these tags: {weak_tags}\n\
         \n\
         Please generate a concise, 3-step study plan for me to improve my rating by 100 points.\n\
         Focus on specific topics I should learn and the difficulty range of problems I should practice \
         (e.g., rated {low} to {high}).\n\
         Keep it encouraging but technical.\n",
        handle = user.handle,
        rating = rating,
        rank = rank,
        weak_tags = weak_tags,
        low = rating + 100,
        high = rating + 300,
    )
}

/// Produce the study plan text for `user`.
///
/// Never fails: a missing generator, an empty answer and a failed call each map to a fixed message.
pub async fn generate_study_plan(
    generator: Option<&dyn TextGenerator>,
    user: &User,
    submissions: &[Submission],
) -> String {
    let Some(generator) = generator else {
        tracing::warn!("Text generator is not configured");
        return String::from(MISSING_KEY_MESSAGE);
    };

    let prompt = build_prompt(user, &weak_tags_summary(submissions));
    match generator.generate(&prompt).await {
        Ok(Some(text)) if !text.is_empty() => text,
        Ok(_) => String::from(EMPTY_PLAN_MESSAGE),
        Err(e) => {
            tracing::error!("Study plan generation failed: {}", e);
            String::from(SERVICE_FAILURE_MESSAGE)
        }
    }
}

/// Fetch profile and recent submissions of `handle` and generate a plan from them.
pub async fn prepare_study_plan<A>(
    api: &A,
    generator: Option<&dyn TextGenerator>,
    handle: &str,
) -> Result<String, DashboardError>
where
    A: CodeforcesApi + ?Sized,
{
    let handles = [handle.to_string()];
    let (users, submissions) = futures::try_join!(
        api.user_info(&handles),
        api.user_status(handle, STUDY_PLAN_SUBMISSIONS),
    )?;
    let user = users
        .into_iter()
        .next()
        .ok_or(DashboardError::UserNotFound)?;

    Ok(generate_study_plan(generator, &user, &submissions).await)
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini `generateContent` client.
pub struct GeminiGenerator {
    base_url: Url,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self, GenerateError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().gzip(true).build()?;

        Ok(GeminiGenerator {
            base_url,
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, GenerateError> {
        let url = self
            .base_url
            .join(&format!("models/{}:generateContent", self.model))?;
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!("POST {}", url);
        let res = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(GenerateError::UnexpectedError(format!(
                "generation service answered {}: {}",
                status, message
            )));
        }

        let response: GenerateContentResponse = res.json().await?;
        Ok(response.text())
    }
}
