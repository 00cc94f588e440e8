use crate::{codeforces::model::Problem, rank::difficulty_to_color};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use validator::{Validate, ValidationError};

pub const MAX_DISPLAYED_PROBLEMS: usize = 100;
pub const MAX_DISPLAYED_TAGS: usize = 3;

fn validate_rating_range(filter: &ProblemFilter) -> Result<(), ValidationError> {
    match (filter.min_rating, filter.max_rating) {
        (Some(min), Some(max)) if min > max => {
            Err(ValidationError::new("min_rating must not exceed max_rating"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_rating_range"))]
pub struct ProblemFilter {
    #[validate(length(max = 200))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[validate(range(min = 0, max = 5000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<i32>,
    #[validate(range(min = 0, max = 5000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<i32>,
}

fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

impl ProblemFilter {
    /// Whether `problem` passes every criterion of the filter.
    ///
    /// The keyword matches the problem name or any tag, ignoring case and
    /// Unicode compatibility differences. Unrated problems count as rating 0.
    pub fn matches(&self, problem: &Problem) -> bool {
        if let Some(keyword) = self.keyword.as_deref().filter(|keyword| !keyword.is_empty()) {
            let keyword = normalize(keyword);
            let hit = normalize(&problem.name).contains(&keyword)
                || problem
                    .tags
                    .iter()
                    .any(|tag| normalize(tag).contains(&keyword));
            if !hit {
                return false;
            }
        }

        let rating = problem.rating.unwrap_or(0);
        if self.min_rating.map(|min| rating < min).unwrap_or(false) {
            return false;
        }
        if self.max_rating.map(|max| rating > max).unwrap_or(false) {
            return false;
        }

        true
    }

    /// Matching problems in catalog order, at most [`MAX_DISPLAYED_PROBLEMS`].
    pub fn apply<'a>(&self, problems: &'a [Problem]) -> Vec<&'a Problem> {
        problems
            .iter()
            .filter(|problem| self.matches(problem))
            .take(MAX_DISPLAYED_PROBLEMS)
            .collect()
    }
}

/// Display row of the problem catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemRow {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub more_tags: Option<String>,
    pub rating: Option<i32>,
    pub color: Option<&'static str>,
}

impl From<&Problem> for ProblemRow {
    fn from(problem: &Problem) -> Self {
        let hidden = problem.tags.len().saturating_sub(MAX_DISPLAYED_TAGS);
        Self {
            id: problem.problem_id(),
            name: problem.name.clone(),
            url: problem.url(),
            tags: problem
                .tags
                .iter()
                .take(MAX_DISPLAYED_TAGS)
                .cloned()
                .collect(),
            more_tags: (hidden > 0).then(|| format!("+{}", hidden)),
            rating: problem.rating,
            color: problem.rating.map(difficulty_to_color),
        }
    }
}
