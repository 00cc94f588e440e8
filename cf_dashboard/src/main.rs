mod cmd;
mod modules;

use crate::cmd::{
    contests::{self, ContestsArgs},
    dashboard::{self, DashboardArgs},
    login::{self, LoginArgs},
    logout::{self, LogoutArgs},
    plan::{self, PlanArgs},
    problems::{self, ProblemsArgs},
    server::{self, ServerArgs},
};
use cf_dashboard_libs::session::Session;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::{env, str::FromStr};
use tokio::runtime::Builder;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, time::OffsetTime},
};

#[derive(Debug, Parser)]
#[command(name = "cf_dashboard")]
#[command(about = "Codeforces dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Remember a Codeforces handle
    Login(LoginArgs),
    /// Forget the remembered handle
    Logout(LogoutArgs),
    /// Profile, rating history and recent submissions
    Dashboard(DashboardArgs),
    Contests(ContestsArgs),
    Problems(ProblemsArgs),
    /// AI study plan based on recent submissions
    Plan(PlanArgs),
    /// Serve the dashboard as a JSON API
    Server(ServerArgs),
}

fn main() {
    dotenv().ok();

    let log_level = env::var("RUST_LOG").unwrap_or(String::from("info"));
    let filter = EnvFilter::builder()
        .with_default_directive(
            LevelFilter::from_str(&log_level)
                .unwrap_or(LevelFilter::INFO)
                .into(),
        )
        .from_env_lossy();
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_timer(OffsetTime::local_rfc_3339().expect("couldn't get local time offset"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(format)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    let cli = Cli::parse();
    let store = cmd::session_store();
    let mut session = runtime.block_on(store.load()).unwrap_or_else(|e| {
        tracing::warn!("Session {} is ignored: {}", store.path().display(), e);
        Session::default()
    });

    let result = match cli.command {
        Commands::Login(args) => runtime.block_on(login::run(args, &store, &mut session)),
        Commands::Logout(args) => runtime.block_on(logout::run(args, &store, &mut session)),
        Commands::Dashboard(args) => runtime.block_on(dashboard::run(args, &session)),
        Commands::Contests(args) => runtime.block_on(contests::run(args)),
        Commands::Problems(args) => runtime.block_on(problems::run(args)),
        Commands::Plan(args) => runtime.block_on(plan::run(args, &session)),
        Commands::Server(args) => runtime.block_on(server::run(args)),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
