use crate::cmd::{codeforces_client, ContestFilterArg};
use anyhow::{Context, Result};
use cf_dashboard_libs::{
    codeforces::CodeforcesApi,
    contests::{select_contests, ContestFilter, ContestRow},
};
use clap::Args;

#[derive(Debug, Args)]
pub struct ContestsArgs {
    #[arg(long, value_enum, default_value_t = ContestFilterArg::Upcoming)]
    filter: ContestFilterArg,
    /// List gym contests instead of regular ones
    #[arg(long)]
    gym: bool,
}

pub async fn run(args: ContestsArgs) -> Result<()> {
    let client = codeforces_client()?;
    let filter = ContestFilter::from(args.filter);

    tracing::info!("Fetch {} contests", filter);
    let contests = client.contest_list(args.gym).await.with_context(|| {
        let message = "failed to fetch contest list";
        tracing::error!(message);
        message
    })?;

    let rows: Vec<ContestRow> = select_contests(contests, filter)
        .iter()
        .map(ContestRow::from)
        .collect();
    if rows.is_empty() {
        println!("No contests found");
    }
    for row in rows {
        println!(
            "{:>6}  {:<60}  {:<5}  {:<20}  {:>6}  {}",
            row.id, row.name, row.kind, row.start, row.length, row.status
        );
    }

    Ok(())
}
