use crate::codeforces::model::{Contest, ContestPhase};
use serde::{Deserialize, Serialize};
use std::{cmp::Reverse, fmt, str::FromStr};

pub const MAX_DISPLAYED_CONTESTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestFilter {
    #[default]
    Upcoming,
    Finished,
    All,
}

impl ContestFilter {
    pub fn accepts(&self, contest: &Contest) -> bool {
        match self {
            ContestFilter::Upcoming => contest.phase == ContestPhase::Before,
            ContestFilter::Finished => contest.phase == ContestPhase::Finished,
            ContestFilter::All => true,
        }
    }
}

impl fmt::Display for ContestFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContestFilter::Upcoming => write!(f, "upcoming"),
            ContestFilter::Finished => write!(f, "finished"),
            ContestFilter::All => write!(f, "all"),
        }
    }
}

impl FromStr for ContestFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(ContestFilter::Upcoming),
            "finished" => Ok(ContestFilter::Finished),
            "all" => Ok(ContestFilter::All),
            other => Err(format!("unknown contest filter: {}", other)),
        }
    }
}

/// Filter contests by phase, order them by start time and keep the first
/// [`MAX_DISPLAYED_CONTESTS`].
///
/// Upcoming contests come soonest first; everything else comes most recent
/// first. A contest without a start time sorts as if it started at epoch 0.
pub fn select_contests(contests: Vec<Contest>, filter: ContestFilter) -> Vec<Contest> {
    let mut contests: Vec<Contest> = contests
        .into_iter()
        .filter(|contest| filter.accepts(contest))
        .collect();

    match filter {
        ContestFilter::Upcoming => {
            contests.sort_by_key(|contest| contest.start_time_seconds.unwrap_or(0))
        }
        _ => contests.sort_by_key(|contest| Reverse(contest.start_time_seconds.unwrap_or(0))),
    }

    contests.truncate(MAX_DISPLAYED_CONTESTS);
    contests
}

/// Render a duration as `H:MM`.
pub fn format_duration(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}:{:02}", hours, minutes)
}

pub fn format_start(contest: &Contest) -> String {
    contest
        .start_time()
        .map(|start| start.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| String::from("-"))
}

pub fn status_label(phase: ContestPhase) -> &'static str {
    match phase {
        ContestPhase::Before => "Upcoming",
        ContestPhase::Coding => "Live",
        _ => "Finished",
    }
}

/// Display row of a contest listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContestRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub start: String,
    pub length: String,
    pub status: &'static str,
}

impl From<&Contest> for ContestRow {
    fn from(contest: &Contest) -> Self {
        Self {
            id: contest.id,
            name: contest.name.clone(),
            kind: contest.kind.to_string(),
            start: format_start(contest),
            length: format_duration(contest.duration_seconds),
            status: status_label(contest.phase),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codeforces::model::ContestType;

    fn contest(id: i64, phase: ContestPhase, start: Option<i64>) -> Contest {
        Contest {
            id,
            name: format!("Contest {}", id),
            kind: ContestType::Cf,
            phase,
            frozen: false,
            duration_seconds: 7200,
            start_time_seconds: start,
            relative_time_seconds: None,
            prepared_by: None,
            website_url: None,
            description: None,
            difficulty: None,
            season: None,
        }
    }

    fn ids(contests: &[Contest]) -> Vec<i64> {
        contests.iter().map(|contest| contest.id).collect()
    }

    fn sample() -> Vec<Contest> {
        vec![
            contest(1, ContestPhase::Finished, Some(100)),
            contest(2, ContestPhase::Before, Some(500)),
            contest(3, ContestPhase::Coding, Some(300)),
            contest(4, ContestPhase::Before, Some(400)),
            contest(5, ContestPhase::Finished, Some(200)),
            contest(6, ContestPhase::Before, None),
        ]
    }

    #[test]
    fn test_upcoming_soonest_first() {
        let selected = select_contests(sample(), ContestFilter::Upcoming);
        assert_eq!(ids(&selected), vec![6, 4, 2]);
    }

    #[test]
    fn test_finished_most_recent_first() {
        let selected = select_contests(sample(), ContestFilter::Finished);
        assert_eq!(ids(&selected), vec![5, 1]);
    }

    #[test]
    fn test_all_keeps_every_phase() {
        let selected = select_contests(sample(), ContestFilter::All);
        assert_eq!(ids(&selected), vec![2, 4, 3, 5, 1, 6]);
    }

    #[test]
    fn test_display_cap() {
        let contests = (0..120)
            .map(|i| contest(i, ContestPhase::Finished, Some(i)))
            .collect();
        let selected = select_contests(contests, ContestFilter::Finished);

        assert_eq!(selected.len(), MAX_DISPLAYED_CONTESTS);
        assert_eq!(selected[0].id, 119);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(7200), "2:00");
        assert_eq!(format_duration(9000), "2:30");
        assert_eq!(format_duration(300), "0:05");
        assert_eq!(format_duration(86400 * 14), "336:00");
    }

    #[test]
    fn test_contest_row() {
        let row = ContestRow::from(&contest(1900, ContestPhase::Coding, Some(1701009300)));
        assert_eq!(row.start, "2023-11-26 14:35 UTC");
        assert_eq!(row.length, "2:00");
        assert_eq!(row.status, "Live");
        assert_eq!(row.kind, "CF");

        let row = ContestRow::from(&contest(1, ContestPhase::Before, None));
        assert_eq!(row.start, "-");
        assert_eq!(row.status, "Upcoming");
    }

    #[test]
    fn test_status_label_for_system_test() {
        assert_eq!(status_label(ContestPhase::PendingSystemTest), "Finished");
        assert_eq!(status_label(ContestPhase::SystemTest), "Finished");
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("UPCOMING".parse(), Ok(ContestFilter::Upcoming));
        assert_eq!("all".parse(), Ok(ContestFilter::All));
        assert!("live".parse::<ContestFilter>().is_err());
    }
}
