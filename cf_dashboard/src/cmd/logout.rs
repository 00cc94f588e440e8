use anyhow::{Context, Result};
use cf_dashboard_libs::session::{Session, SessionStore};
use clap::Args;

#[derive(Debug, Args)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, store: &SessionStore, session: &mut Session) -> Result<()> {
    if !session.is_logged_in() {
        println!("Not logged in");
        return Ok(());
    }

    store.clear(session).await.with_context(|| {
        let message = format!(
            "couldn't clear session file {}",
            store.path().display()
        );
        tracing::error!(message);
        message
    })?;

    println!("Logged out");
    Ok(())
}
