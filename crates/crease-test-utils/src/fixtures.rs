//! Canned match records

use crease_state::{Ball, Batsman, Extras, MatchState};

/// A started match at the top of the innings.
pub fn sample_state() -> MatchState {
    MatchState {
        id: "1".into(),
        team_a: "Lions".into(),
        team_b: "Sharks".into(),
        batting_team: "Lions".into(),
        total_run: 0,
        total_wicket: 0,
        balls: 0,
        this_over: Vec::new(),
        on_strike: Batsman::A,
        batsmen_a: "R. Mehta".into(),
        batsmen_b: "J. Cole".into(),
        batsman_a_score: 0,
        batsman_a_balls: 0,
        batsman_b_score: 0,
        batsman_b_balls: 0,
        bowler: "T. Ndlovu".into(),
        bowler_runs: 0,
        bowler_wickets: 0,
        bowler_overs: 0,
        extras: Extras::default(),
        target: 0,
        match_started: true,
        recent_ball: None,
        video_url: None,
    }
}

/// A started match five legal balls into the first over, one short of
/// completing it.
pub fn sample_state_mid_over() -> MatchState {
    let mut state = sample_state();
    state.total_run = 10;
    state.balls = 5;
    state.this_over = vec![
        Ball::Runs(1),
        Ball::Runs(4),
        Ball::Runs(2),
        Ball::Runs(3),
        Ball::Runs(0),
    ];
    state.batsman_a_score = 10;
    state.batsman_a_balls = 5;
    state.bowler_runs = 10;
    state.recent_ball = Some(Ball::Runs(0));
    state
}
