use axum::{
    async_trait,
    extract::{Extension, FromRequestParts, Path},
    http::StatusCode,
    Json,
};
use cf_dashboard_libs::{
    codeforces::{model::User, CodeforcesApi},
    contests::{select_contests, ContestFilter, ContestRow},
    dashboard::{
        load_dashboard, DashboardError, RatingPoint, SubmissionSummary,
        DEFAULT_RECENT_SUBMISSIONS,
    },
    problems::{ProblemFilter, ProblemRow},
    session::normalize_handle,
    study_plan::{prepare_study_plan, TextGenerator},
};
use http::request::Parts;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub struct AppState {
    pub api: Arc<dyn CodeforcesApi>,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Self {
            data: None,
            message: Some(message.to_string()),
        }
    }
}

type HandlerResponse<T> = (StatusCode, Json<ApiResponse<T>>);

fn bad_request<T>(message: impl ToString) -> HandlerResponse<T> {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

fn gateway_error<T>(e: DashboardError) -> HandlerResponse<T> {
    tracing::error!("request failed cause: {}", e);
    let status = match e {
        DashboardError::UserNotFound => StatusCode::NOT_FOUND,
        DashboardError::ApiError(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ApiResponse::error(e)))
}

/// Query string deserialized with `serde_urlencoded` and checked with `validator`.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HandlerResponse<()>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value: T = serde_urlencoded::from_str(query).map_err(|rejection| {
            tracing::error!("Parsing error: {}", rejection);
            bad_request(format!("invalid format query string: [{}]", rejection))
        })?;

        value.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            bad_request(format!("Validation error: [{}]", rejection).replace('\n', ", "))
        })?;

        Ok(ValidatedQuery(value))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardParams {
    #[validate(range(min = 1, max = 1000))]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: User,
    pub photo: String,
    pub rank_color: &'static str,
    pub rating: Vec<RatingPoint>,
    pub submissions: Vec<SubmissionSummary>,
}

pub async fn dashboard(
    Path(handle): Path<String>,
    ValidatedQuery(params): ValidatedQuery<DashboardParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> HandlerResponse<DashboardResponse> {
    let handle = match normalize_handle(&handle) {
        Ok(handle) => handle,
        Err(e) => return bad_request(e),
    };
    let count = params.count.unwrap_or(DEFAULT_RECENT_SUBMISSIONS);

    match load_dashboard(state.api.as_ref(), &handle, count).await {
        Ok(dashboard) => {
            let response = DashboardResponse {
                photo: dashboard.user.photo().to_string(),
                rank_color: dashboard.rank_color(),
                rating: dashboard.rating_series(),
                submissions: dashboard.submission_summaries(),
                user: dashboard.user,
            };
            (StatusCode::OK, Json(ApiResponse::ok(response)))
        }
        Err(e) => gateway_error(e),
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContestParams {
    #[serde(default)]
    pub filter: ContestFilter,
    #[serde(default)]
    pub gym: bool,
}

pub async fn contests(
    ValidatedQuery(params): ValidatedQuery<ContestParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> HandlerResponse<Vec<ContestRow>> {
    match state.api.contest_list(params.gym).await {
        Ok(contests) => {
            let rows = select_contests(contests, params.filter)
                .iter()
                .map(ContestRow::from)
                .collect();
            (StatusCode::OK, Json(ApiResponse::ok(rows)))
        }
        Err(e) => gateway_error(e.into()),
    }
}

pub async fn problems(
    ValidatedQuery(filter): ValidatedQuery<ProblemFilter>,
    Extension(state): Extension<Arc<AppState>>,
) -> HandlerResponse<Vec<ProblemRow>> {
    match state.api.problemset_problems().await {
        Ok(problemset) => {
            let rows = filter
                .apply(&problemset.problems)
                .into_iter()
                .map(ProblemRow::from)
                .collect();
            (StatusCode::OK, Json(ApiResponse::ok(rows)))
        }
        Err(e) => gateway_error(e.into()),
    }
}

#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub plan: String,
}

pub async fn study_plan(
    Path(handle): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> HandlerResponse<StudyPlanResponse> {
    let handle = match normalize_handle(&handle) {
        Ok(handle) => handle,
        Err(e) => return bad_request(e),
    };

    match prepare_study_plan(state.api.as_ref(), state.generator.as_deref(), &handle).await {
        Ok(plan) => (StatusCode::OK, Json(ApiResponse::ok(StudyPlanResponse { plan }))),
        Err(e) => gateway_error(e),
    }
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmd::server::create_router;
    use axum::{body::Body, http::Request, Router};
    use cf_dashboard_libs::{
        codeforces::{
            model::{Contest, Problemset, RatingChange, Submission},
            CodeforcesError,
        },
        study_plan::{GenerateError, MISSING_KEY_MESSAGE},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    type Result<T> = std::result::Result<T, CodeforcesError>;

    struct StubApi {
        fail: bool,
    }

    impl StubApi {
        fn answer<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
            if self.fail {
                return Err(CodeforcesError::ApiError(String::from(
                    "Call limit exceeded",
                )));
            }
            Ok(serde_json::from_value(value)?)
        }
    }

    #[async_trait]
    impl CodeforcesApi for StubApi {
        async fn user_info(&self, handles: &[String]) -> Result<Vec<User>> {
            if handles[0] == "ghost" {
                return Ok(vec![]);
            }
            self.answer(json!([{
                "handle": handles[0],
                "rating": 2000,
                "rank": "candidate master",
                "avatar": "https://userpic.codeforces.org/no-avatar.jpg",
                "titlePhoto": "https://userpic.codeforces.org/no-title.jpg"
            }]))
        }

        async fn user_rating(&self, _handle: &str) -> Result<Vec<RatingChange>> {
            self.answer(json!([]))
        }

        async fn user_status(&self, _handle: &str, _count: u32) -> Result<Vec<Submission>> {
            self.answer(json!([]))
        }

        async fn contest_list(&self, gym: bool) -> Result<Vec<Contest>> {
            let name = if gym { "Gym Contest" } else { "Codeforces Round" };
            self.answer(json!([
                {"id": 2, "name": name, "type": "CF", "phase": "BEFORE", "durationSeconds": 7200, "startTimeSeconds": 1800000000},
                {"id": 1, "name": "Old Round", "type": "ICPC", "phase": "FINISHED", "durationSeconds": 18000, "startTimeSeconds": 1600000000}
            ]))
        }

        async fn problemset_problems(&self) -> Result<Problemset> {
            self.answer(json!({
                "problems": [
                    {"contestId": 4, "index": "A", "name": "Watermelon", "rating": 800, "tags": ["brute force", "math"]},
                    {"contestId": 1899, "index": "C", "name": "Yarik and Array", "rating": 1100, "tags": ["dp", "greedy", "two pointers", "sortings"]}
                ],
                "problemStatistics": []
            }))
        }
    }

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &str) -> std::result::Result<Option<String>, GenerateError> {
            Ok(Some(format!("plan for {} chars", prompt.len())))
        }
    }

    fn app(fail: bool, generator: Option<Arc<dyn TextGenerator>>) -> Router {
        create_router(AppState {
            api: Arc::new(StubApi { fail }),
            generator,
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let body = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, _) = get(app(false, None), "/api/liveness").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (status, body) = get(app(false, None), "/api/dashboard/tourist?count=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user"]["handle"], "tourist");
        assert_eq!(body["data"]["rank_color"], "purple");
        assert_eq!(
            body["data"]["photo"],
            "https://userpic.codeforces.org/no-title.jpg"
        );
        assert_eq!(body["data"]["rating"], json!([]));
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_dashboard_invalid_handle() {
        let (status, body) = get(app(false, None), "/api/dashboard/x").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("invalid handle"));
    }

    #[tokio::test]
    async fn test_dashboard_invalid_count() {
        let (status, body) = get(app(false, None), "/api/dashboard/tourist?count=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Validation error"));
    }

    #[tokio::test]
    async fn test_dashboard_unknown_user() {
        let (status, body) = get(app(false, None), "/api/dashboard/ghost").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_gateway_failure() {
        let (status, body) = get(app(true, None), "/api/dashboard/tourist").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"message": "Call limit exceeded"}));
    }

    #[tokio::test]
    async fn test_contests() {
        let (status, body) = get(app(false, None), "/api/contests").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["status"], "Upcoming");

        let (_, body) = get(app(false, None), "/api/contests?filter=all&gym=true").await;
        assert_eq!(body["data"][0]["name"], "Gym Contest");
        assert_eq!(body["data"][1]["length"], "5:00");
    }

    #[tokio::test]
    async fn test_contests_unknown_filter() {
        let (status, body) = get(app(false, None), "/api/contests?filter=live").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid format query string"));
    }

    #[tokio::test]
    async fn test_problems() {
        let (status, body) = get(app(false, None), "/api/problems?keyword=DP&min_rating=1000").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "1899C");
        assert_eq!(rows[0]["tags"], json!(["dp", "greedy", "two pointers"]));
        assert_eq!(rows[0]["more_tags"], "+1");
        assert_eq!(rows[0]["color"], "green");
    }

    #[tokio::test]
    async fn test_problems_inverted_range() {
        let (status, _) = get(
            app(false, None),
            "/api/problems?min_rating=2000&max_rating=1000",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_study_plan_without_generator() {
        let (status, body) = get(app(false, None), "/api/plan/tourist").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["plan"], MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn test_study_plan() {
        let generator: Arc<dyn TextGenerator> = Arc::new(Echo);
        let (status, body) = get(app(false, Some(generator)), "/api/plan/tourist").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["plan"]
            .as_str()
            .unwrap()
            .starts_with("plan for "));
    }
}
