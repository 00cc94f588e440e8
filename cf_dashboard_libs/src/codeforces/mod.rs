pub mod client;
pub mod model;
pub mod request;

pub use client::{CodeforcesApi, CodeforcesClient, CodeforcesError};
