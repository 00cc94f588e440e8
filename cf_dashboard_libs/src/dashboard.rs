use crate::{
    codeforces::{
        model::{RatingChange, Submission, User, Verdict},
        CodeforcesApi, CodeforcesError,
    },
    rank::rank_to_color,
};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

pub const DEFAULT_RECENT_SUBMISSIONS: u32 = 15;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    ApiError(#[from] CodeforcesError),
    #[error("User not found")]
    UserNotFound,
}

/// State of a view bound to one asynchronous load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T, E: Display> From<Result<T, E>> for ViewState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub user: User,
    pub rating_history: Vec<RatingChange>,
    pub recent_submissions: Vec<Submission>,
}

/// Load profile, rating history and recent submissions of `handle` concurrently.
///
/// All three calls must succeed: the first failure is returned and whatever the
/// other calls produced is dropped.
pub async fn load_dashboard<A>(
    api: &A,
    handle: &str,
    count: u32,
) -> Result<Dashboard, DashboardError>
where
    A: CodeforcesApi + ?Sized,
{
    tracing::info!("Load dashboard of {}", handle);
    let handles = [handle.to_string()];
    let (users, rating_history, recent_submissions) = futures::try_join!(
        api.user_info(&handles),
        api.user_rating(handle),
        api.user_status(handle, count),
    )?;

    let user = users
        .into_iter()
        .next()
        .ok_or(DashboardError::UserNotFound)?;

    Ok(Dashboard {
        user,
        rating_history,
        recent_submissions,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingPoint {
    pub date: String,
    pub rating: i32,
    pub delta: i32,
    pub contest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionSummary {
    pub id: i64,
    pub problem: String,
    pub url: Option<String>,
    pub date: String,
    pub verdict: String,
    pub language: String,
}

/// Human readable verdict: `Accepted` for OK, the wire name with spaces otherwise.
pub fn verdict_label(verdict: Option<Verdict>) -> String {
    match verdict {
        Some(Verdict::Ok) => String::from("Accepted"),
        Some(verdict) => verdict.as_str().replace('_', " "),
        None => String::from("Unknown"),
    }
}

fn format_date(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl Dashboard {
    pub fn rank_color(&self) -> &'static str {
        self.user
            .rank
            .as_deref()
            .map(rank_to_color)
            .unwrap_or("gray")
    }

    /// Rating chart series, one point per rated contest.
    pub fn rating_series(&self) -> Vec<RatingPoint> {
        self.rating_history
            .iter()
            .map(|change| RatingPoint {
                date: format_date(change.updated_at()),
                rating: change.new_rating,
                delta: change.delta(),
                contest: change.contest_name.clone(),
            })
            .collect()
    }

    pub fn submission_summaries(&self) -> Vec<SubmissionSummary> {
        self.recent_submissions
            .iter()
            .map(|submission| SubmissionSummary {
                id: submission.id,
                problem: format!("{}. {}", submission.problem.index, submission.problem.name),
                url: submission.problem_url(),
                date: format_date(submission.created_at()),
                verdict: verdict_label(submission.verdict),
                language: submission.programming_language.clone(),
            })
            .collect()
    }
}
