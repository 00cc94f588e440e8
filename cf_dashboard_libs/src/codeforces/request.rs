use crate::{
    api::{ParamValue, ToParams},
    codeforces::model::{Contest, Problemset, RatingChange, Submission, User},
};
use cf_dashboard_derive::ToParams;
use serde::de::DeserializeOwned;

pub const DEFAULT_STATUS_COUNT: u32 = 20;

/// A typed Codeforces API method: its remote name, parameters and result type.
pub trait ApiMethod: ToParams {
    const METHOD: &'static str;
    type Response: DeserializeOwned + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, ToParams)]
pub struct UserInfoRequest {
    #[param(join = ";")]
    pub handles: Vec<String>,
}

impl ApiMethod for UserInfoRequest {
    const METHOD: &'static str = "user.info";
    type Response = Vec<User>;
}

#[derive(Debug, Clone, PartialEq, Eq, ToParams)]
pub struct UserRatingRequest {
    pub handle: String,
}

impl ApiMethod for UserRatingRequest {
    const METHOD: &'static str = "user.rating";
    type Response = Vec<RatingChange>;
}

#[derive(Debug, Clone, PartialEq, Eq, ToParams)]
pub struct UserStatusRequest {
    pub handle: String,
    pub from: u32,
    pub count: u32,
}

impl UserStatusRequest {
    /// The latest `DEFAULT_STATUS_COUNT` submissions of `handle`.
    pub fn new(handle: impl Into<String>) -> Self {
        Self::recent(handle, DEFAULT_STATUS_COUNT)
    }

    /// The most recent `count` submissions of `handle`.
    pub fn recent(handle: impl Into<String>, count: u32) -> Self {
        Self {
            handle: handle.into(),
            from: 1,
            count,
        }
    }
}

impl ApiMethod for UserStatusRequest {
    const METHOD: &'static str = "user.status";
    type Response = Vec<Submission>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, ToParams)]
pub struct ContestListRequest {
    pub gym: bool,
}

impl ApiMethod for ContestListRequest {
    const METHOD: &'static str = "contest.list";
    type Response = Vec<Contest>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, ToParams)]
pub struct ProblemsetProblemsRequest {
    #[param(rename = "problemsetName")]
    pub problemset_name: Option<String>,
}

impl ApiMethod for ProblemsetProblemsRequest {
    const METHOD: &'static str = "problemset.problems";
    type Response = Problemset;
}
