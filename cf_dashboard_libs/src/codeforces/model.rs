use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;

/// Response wrapper every Codeforces API method answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: ApiStatus,
    pub result: Option<T>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiStatus {
    Ok,
    Failed,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub handle: String,
    pub email: Option<String>,
    pub vk_id: Option<String>,
    pub open_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub organization: Option<String>,
    #[serde(default)]
    pub contribution: i64,
    pub rank: Option<String>,
    pub rating: Option<i32>,
    pub max_rank: Option<String>,
    pub max_rating: Option<i32>,
    #[serde(default)]
    pub last_online_time_seconds: i64,
    #[serde(default)]
    pub registration_time_seconds: i64,
    #[serde(default)]
    pub friend_of_count: i64,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub title_photo: String,
}

impl User {
    /// Title photo if any, avatar otherwise.
    pub fn photo(&self) -> &str {
        if self.title_photo.is_empty() {
            &self.avatar
        } else {
            &self.title_photo
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: i64,
    pub contest_name: String,
    pub handle: String,
    pub rank: i64,
    pub rating_update_time_seconds: i64,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingChange {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_second(self.rating_update_time_seconds)
    }

    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContestType {
    Cf,
    Ioi,
    Icpc,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContestType::Cf => write!(f, "CF"),
            ContestType::Ioi => write!(f, "IOI"),
            ContestType::Icpc => write!(f, "ICPC"),
            ContestType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Lifecycle phase of a contest, declared in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
    #[serde(other)]
    Unknown,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ContestType,
    pub phase: ContestPhase,
    #[serde(default)]
    pub frozen: bool,
    pub duration_seconds: i64,
    pub start_time_seconds: Option<i64>,
    pub relative_time_seconds: Option<i64>,
    pub prepared_by: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<i32>,
    pub season: Option<String>,
}

impl Contest {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time_seconds.and_then(from_epoch_second)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProblemType {
    #[default]
    Programming,
    Question,
    #[serde(other)]
    Unknown,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub contest_id: Option<i64>,
    pub problemset_name: Option<String>,
    pub index: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ProblemType,
    pub points: Option<f64>,
    pub rating: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Problem {
    /// Compound identifier such as `1800A`.
    pub fn problem_id(&self) -> String {
        match self.contest_id {
            Some(contest_id) => format!("{}{}", contest_id, self.index),
            None => self.index.clone(),
        }
    }

    pub fn url(&self) -> Option<String> {
        self.contest_id.map(|contest_id| {
            format!(
                "https://codeforces.com/problemset/problem/{}/{}",
                contest_id, self.index
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatistics {
    pub contest_id: Option<i64>,
    pub index: String,
    pub solved_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problemset {
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub problem_statistics: Vec<ProblemStatistics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Failed,
    Ok,
    Partial,
    CompilationError,
    RuntimeError,
    WrongAnswer,
    PresentationError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    IdlenessLimitExceeded,
    SecurityViolated,
    Crashed,
    InputPreparationCrashed,
    Challenged,
    Skipped,
    Testing,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl Verdict {
    /// Wire name of the verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Failed => "FAILED",
            Verdict::Ok => "OK",
            Verdict::Partial => "PARTIAL",
            Verdict::CompilationError => "COMPILATION_ERROR",
            Verdict::RuntimeError => "RUNTIME_ERROR",
            Verdict::WrongAnswer => "WRONG_ANSWER",
            Verdict::PresentationError => "PRESENTATION_ERROR",
            Verdict::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Verdict::MemoryLimitExceeded => "MEMORY_LIMIT_EXCEEDED",
            Verdict::IdlenessLimitExceeded => "IDLENESS_LIMIT_EXCEEDED",
            Verdict::SecurityViolated => "SECURITY_VIOLATED",
            Verdict::Crashed => "CRASHED",
            Verdict::InputPreparationCrashed => "INPUT_PREPARATION_CRASHED",
            Verdict::Challenged => "CHALLENGED",
            Verdict::Skipped => "SKIPPED",
            Verdict::Testing => "TESTING",
            Verdict::Rejected => "REJECTED",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantType {
    Contestant,
    Practice,
    Virtual,
    Manager,
    OutOfCompetition,
    #[serde(other)]
    Unknown,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub handle: String,
    pub name: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub contest_id: Option<i64>,
    #[serde(default)]
    pub members: Vec<Member>,
    pub participant_type: ParticipantType,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    #[serde(default)]
    pub ghost: bool,
    pub room: Option<i64>,
    pub start_time_seconds: Option<i64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub contest_id: Option<i64>,
    pub creation_time_seconds: i64,
    #[serde(default)]
    pub relative_time_seconds: i64,
    pub problem: Problem,
    pub author: Party,
    pub programming_language: String,
    pub verdict: Option<Verdict>,
    pub testset: Option<String>,
    #[serde(default)]
    pub passed_test_count: i64,
    #[serde(default)]
    pub time_consumed_millis: i64,
    #[serde(default)]
    pub memory_consumed_bytes: i64,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Some(Verdict::Ok)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_second(self.creation_time_seconds)
    }

    /// Link to the problem inside its contest.
    pub fn problem_url(&self) -> Option<String> {
        self.contest_id.or(self.problem.contest_id).map(|contest_id| {
            format!(
                "https://codeforces.com/contest/{}/problem/{}",
                contest_id, self.problem.index
            )
        })
    }
}

pub fn from_epoch_second(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}
