use crate::cmd::{codeforces_client, resolve_handle, text_generator};
use anyhow::{Context, Result};
use cf_dashboard_libs::{
    session::Session,
    study_plan::{prepare_study_plan, TextGenerator},
};
use clap::Args;

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(long)]
    handle: Option<String>,
}

pub async fn run(args: PlanArgs, session: &Session) -> Result<()> {
    let handle = resolve_handle(args.handle, session)?;
    let client = codeforces_client()?;
    let generator = text_generator()?;

    println!("Analyzing submissions of {}...", handle);
    let plan = prepare_study_plan(
        &client,
        generator.as_ref().map(|g| g as &dyn TextGenerator),
        &handle,
    )
    .await
    .with_context(|| {
        let message = format!("couldn't prepare study plan for {}", handle);
        tracing::error!(message);
        message
    })?;

    println!();
    println!("{}", plan);
    Ok(())
}
