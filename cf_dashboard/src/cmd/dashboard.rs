use crate::cmd::{codeforces_client, resolve_handle};
use anyhow::Result;
use cf_dashboard_libs::{
    dashboard::{load_dashboard, Dashboard, ViewState, DEFAULT_RECENT_SUBMISSIONS},
    session::Session,
};
use clap::Args;
use itertools::Itertools;

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Handle to show instead of the logged in one
    #[arg(long)]
    handle: Option<String>,
    /// Number of recent submissions to show
    #[arg(long, default_value_t = DEFAULT_RECENT_SUBMISSIONS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    count: u32,
}

pub async fn run(args: DashboardArgs, session: &Session) -> Result<()> {
    let handle = resolve_handle(args.handle, session)?;
    let client = codeforces_client()?;

    let state: ViewState<Dashboard> = ViewState::Loading;
    render(&state)?;
    let state: ViewState<Dashboard> = load_dashboard(&client, &handle, args.count).await.into();
    render(&state)
}

fn render(state: &ViewState<Dashboard>) -> Result<()> {
    match state {
        ViewState::Loading => println!("Loading profile data..."),
        ViewState::Ready(dashboard) => render_dashboard(dashboard),
        ViewState::Failed(message) => anyhow::bail!(message.clone()),
    }
    Ok(())
}

fn render_dashboard(dashboard: &Dashboard) {
    let user = &dashboard.user;
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .join(" ");

    println!();
    println!("{} [{}]", user.handle, dashboard.rank_color());
    if !name.is_empty() {
        println!("  {}", name);
    }
    if let Some(organization) = user.organization.as_deref() {
        println!("  {}", organization);
    }
    println!(
        "  Rank:       {}",
        user.rank.as_deref().unwrap_or("unrated")
    );
    println!(
        "  Rating:     {} (max {})",
        user.rating.unwrap_or(0),
        user.max_rating.unwrap_or(0)
    );
    println!("  Max rank:   {}", user.max_rank.as_deref().unwrap_or("-"));
    println!("  Contribution: {}", user.contribution);
    println!("  Friends of: {}", user.friend_of_count);
    if !user.photo().is_empty() {
        println!("  Photo:      {}", user.photo());
    }

    println!();
    println!("Rating history");
    let series = dashboard.rating_series();
    if series.is_empty() {
        println!("  No rated contests yet");
    }
    for point in series.iter() {
        println!(
            "  {}  {:>5} ({:+})  {}",
            point.date, point.rating, point.delta, point.contest
        );
    }

    println!();
    println!("Recent submissions");
    for summary in dashboard.submission_summaries() {
        println!(
            "  {}  {:<40}  {:<24}  {}",
            summary.date, summary.problem, summary.verdict, summary.language
        );
    }
}
