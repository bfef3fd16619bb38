//! Derived statistics
//!
//! Stateless functions of the match record. Every rate is returned as
//! two-decimal fixed-point text with trailing zeros preserved ("6.00", not
//! "6"), matching the scoreboard wire format. Zero denominators yield
//! "0.00" rather than a division fault.

use crate::match_state::{Batsman, MatchState};
use crate::reducer::BALLS_PER_OVER;

/// "completed.partial" overs notation for a ball count, e.g. 11 balls → "1.5".
pub fn overs(balls: u32) -> String {
    format!("{}.{}", balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
}

/// Runs per over for the batting side so far.
pub fn run_rate(total_run: u32, balls: u32) -> String {
    if balls == 0 {
        return "0.00".to_string();
    }
    format!(
        "{:.2}",
        f64::from(total_run) / (f64::from(balls) / f64::from(BALLS_PER_OVER))
    )
}

/// Runs per hundred balls faced.
pub fn strike_rate(runs: u32, balls_faced: u32) -> String {
    if balls_faced == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", f64::from(runs) / f64::from(balls_faced) * 100.0)
}

/// Runs conceded per over bowled, from completed overs plus the partial over.
pub fn economy(runs_conceded: u32, completed_overs: u32, partial_balls: u32) -> String {
    let total_balls = completed_overs * BALLS_PER_OVER + partial_balls;
    if total_balls == 0 {
        return "0.00".to_string();
    }
    format!(
        "{:.2}",
        f64::from(runs_conceded) / f64::from(total_balls) * f64::from(BALLS_PER_OVER)
    )
}

/// Runs still required to reach the target, saturating at zero.
pub fn runs_needed(target: u32, total_run: u32) -> u32 {
    target.saturating_sub(total_run)
}

/// Required run rate for the chasing side.
///
/// Only meaningful when a target is set. `total_overs` is the scheduled
/// match length, which lives in external match configuration and is supplied
/// by the caller. A finished chase or exhausted innings yields "0.00".
pub fn required_run_rate(target: u32, total_run: u32, balls: u32, total_overs: u32) -> String {
    if target == 0 {
        return "0.00".to_string();
    }
    let remaining_runs = runs_needed(target, total_run);
    let remaining_balls = (total_overs * BALLS_PER_OVER).saturating_sub(balls);
    if remaining_runs == 0 || remaining_balls == 0 {
        return "0.00".to_string();
    }
    format!(
        "{:.2}",
        f64::from(remaining_runs) / (f64::from(remaining_balls) / f64::from(BALLS_PER_OVER))
    )
}

/// A display-ready summary derived from one match record.
///
/// This is what the poller hands to read-only consumers (score overlay,
/// video overlay): every rate already formatted, no further arithmetic
/// needed at the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    pub team_a: String,
    pub team_b: String,
    pub batting_team: String,

    pub total_run: u32,
    pub total_wicket: u32,
    pub overs: String,
    pub run_rate: String,

    pub on_strike: Batsman,
    pub strike_rate_a: String,
    pub strike_rate_b: String,

    /// "completed.partial-runs-wickets", the standard bowling figures line.
    pub bowler_figures: String,
    pub economy: String,

    pub total_extras: u32,
    pub second_innings: bool,
    pub target: Option<u32>,
    pub runs_needed: Option<u32>,
    /// Present only when chasing and the match length is known.
    pub required_run_rate: Option<String>,
}

impl Scoreboard {
    /// Build a summary from a record. `total_overs` is the scheduled match
    /// length when known; without it no required rate is reported.
    pub fn from_state(state: &MatchState, total_overs: Option<u32>) -> Self {
        let partial_balls = state.balls % BALLS_PER_OVER;
        let chasing = state.second_innings();

        Scoreboard {
            team_a: state.team_a.clone(),
            team_b: state.team_b.clone(),
            batting_team: state.batting_team.clone(),
            total_run: state.total_run,
            total_wicket: state.total_wicket,
            overs: overs(state.balls),
            run_rate: run_rate(state.total_run, state.balls),
            on_strike: state.on_strike,
            strike_rate_a: strike_rate(state.batsman_a_score, state.batsman_a_balls),
            strike_rate_b: strike_rate(state.batsman_b_score, state.batsman_b_balls),
            bowler_figures: format!(
                "{}.{}-{}-{}",
                state.bowler_overs, partial_balls, state.bowler_runs, state.bowler_wickets
            ),
            economy: economy(state.bowler_runs, state.bowler_overs, partial_balls),
            total_extras: state.extras.total(),
            second_innings: chasing,
            target: chasing.then_some(state.target),
            runs_needed: chasing.then(|| runs_needed(state.target, state.total_run)),
            required_run_rate: match (chasing, total_overs) {
                (true, Some(total)) => Some(required_run_rate(
                    state.target,
                    state.total_run,
                    state.balls,
                    total,
                )),
                _ => None,
            },
        }
    }
}
