use anyhow::{Context, Result};
use cf_dashboard_libs::session::{Session, SessionStore};
use clap::Args;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Codeforces handle to remember
    handle: String,
}

pub async fn run(args: LoginArgs, store: &SessionStore, session: &mut Session) -> Result<()> {
    store
        .remember(session, &args.handle)
        .await
        .with_context(|| {
            let message = format!("couldn't log in as `{}`", args.handle.trim());
            tracing::error!(message);
            message
        })?;

    if let Some(handle) = session.handle() {
        println!("Logged as {}", handle);
    }
    Ok(())
}
