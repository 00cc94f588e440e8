use crate::cmd::codeforces_client;
use anyhow::{Context, Result};
use cf_dashboard_libs::{
    codeforces::CodeforcesApi,
    problems::{ProblemFilter, ProblemRow},
};
use clap::Args;
use itertools::Itertools;
use validator::Validate;

#[derive(Debug, Args)]
pub struct ProblemsArgs {
    /// Search by name or tag
    #[arg(long)]
    keyword: Option<String>,
    #[arg(long)]
    min_rating: Option<i32>,
    #[arg(long)]
    max_rating: Option<i32>,
}

pub async fn run(args: ProblemsArgs) -> Result<()> {
    let filter = ProblemFilter {
        keyword: args.keyword,
        min_rating: args.min_rating,
        max_rating: args.max_rating,
    };
    filter.validate().with_context(|| {
        let message = "invalid problem filter";
        tracing::error!(message);
        message
    })?;

    let client = codeforces_client()?;
    let problemset = client.problemset_problems().await.with_context(|| {
        let message = "failed to fetch problemset";
        tracing::error!(message);
        message
    })?;

    let problems = filter.apply(&problemset.problems);
    tracing::info!(
        "{} of {} problems matched",
        problems.len(),
        problemset.problems.len()
    );
    if problems.is_empty() {
        println!("No problems found matching your criteria.");
    }

    for row in problems.into_iter().map(ProblemRow::from) {
        let tags = row
            .tags
            .iter()
            .map(String::as_str)
            .chain(row.more_tags.as_deref())
            .join(", ");
        let rating = row
            .rating
            .map(|rating| format!("{} ({})", rating, row.color.unwrap_or("gray")))
            .unwrap_or_else(|| String::from("-"));
        println!("{:<8}  {:<50}  {:<14}  {}", row.id, row.name, rating, tags);
    }

    Ok(())
}
