pub mod contests;
pub mod dashboard;
pub mod login;
pub mod logout;
pub mod plan;
pub mod problems;
pub mod server;

use anyhow::{Context, Result};
use cf_dashboard_libs::{
    codeforces::{client::DEFAULT_API_URL, CodeforcesClient},
    contests::ContestFilter,
    session::{normalize_handle, Session, SessionStore, DEFAULT_SESSION_FILE},
    study_plan::{GeminiGenerator, DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL},
};
use clap::ValueEnum;
use std::{env, time::Duration};

#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum ContestFilterArg {
    Upcoming,
    Finished,
    All,
}

impl From<ContestFilterArg> for ContestFilter {
    fn from(arg: ContestFilterArg) -> Self {
        match arg {
            ContestFilterArg::Upcoming => ContestFilter::Upcoming,
            ContestFilterArg::Finished => ContestFilter::Finished,
            ContestFilterArg::All => ContestFilter::All,
        }
    }
}

pub fn codeforces_client() -> Result<CodeforcesClient> {
    let api_url = env::var("CODEFORCES_API_URL").unwrap_or_else(|_| String::from(DEFAULT_API_URL));

    let client = match env::var("CODEFORCES_TIMEOUT_SECS") {
        Ok(seconds) => {
            let seconds: u64 = seconds.parse().with_context(|| {
                let message = "CODEFORCES_TIMEOUT_SECS must be a number of seconds";
                tracing::error!(message);
                message
            })?;
            CodeforcesClient::with_timeout(&api_url, Duration::from_secs(seconds))
        }
        Err(_) => CodeforcesClient::new(&api_url),
    };

    client.with_context(|| {
        let message = format!(
            "couldn't create Codeforces API client. check the value of CODEFORCES_API_URL: {}",
            api_url
        );
        tracing::error!(message);
        message
    })
}

/// Gemini client configured from the environment, `None` when no API key is set.
pub fn text_generator() -> Result<Option<GeminiGenerator>> {
    let api_key = match env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        Ok(api_key) if !api_key.is_empty() => api_key,
        _ => {
            tracing::warn!("GEMINI_API_KEY environment variable is not set. Study plans are disabled.");
            return Ok(None);
        }
    };
    let api_url =
        env::var("GEMINI_API_URL").unwrap_or_else(|_| String::from(DEFAULT_GEMINI_API_URL));
    let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| String::from(DEFAULT_GEMINI_MODEL));

    let generator = GeminiGenerator::new(&api_url, &model, &api_key).with_context(|| {
        let message = format!(
            "couldn't create Gemini client. check the value of GEMINI_API_URL: {}",
            api_url
        );
        tracing::error!(message);
        message
    })?;
    tracing::info!("Study plans use model {}", generator.model());

    Ok(Some(generator))
}

pub fn session_store() -> SessionStore {
    let path =
        env::var("CF_DASHBOARD_SESSION").unwrap_or_else(|_| String::from(DEFAULT_SESSION_FILE));
    SessionStore::new(path)
}

/// Handle given on the command line, or the remembered one.
pub fn resolve_handle(handle: Option<String>, session: &Session) -> Result<String> {
    match handle {
        Some(handle) => normalize_handle(&handle).with_context(|| {
            let message = format!("`{}` is not a valid Codeforces handle", handle);
            tracing::error!(message);
            message
        }),
        None => match session.handle() {
            Some(handle) => Ok(handle.to_string()),
            None => {
                let message = "not logged in. run `cf_dashboard login <handle>` or pass --handle";
                tracing::error!(message);
                anyhow::bail!(message)
            }
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resolve_handle_prefers_argument() {
        let session = Session::default();
        let handle = resolve_handle(Some(String::from(" Petr ")), &session).unwrap();
        assert_eq!(handle, "Petr");
    }

    #[test]
    fn test_resolve_handle_without_login() {
        let session = Session::default();
        let error = resolve_handle(None, &session).unwrap_err();
        assert!(error.to_string().contains("not logged in"));
    }

    #[test]
    fn test_resolve_invalid_handle() {
        let session = Session::default();
        assert!(resolve_handle(Some(String::from("a b")), &session).is_err());
    }

    #[test]
    fn test_contest_filter_arg() {
        assert_eq!(
            ContestFilter::from(ContestFilterArg::Finished),
            ContestFilter::Finished
        );
    }
}
