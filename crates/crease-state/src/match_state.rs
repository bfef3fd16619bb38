//! The live match record
//!
//! One `MatchState` document exists per live match. The record is created by
//! the match setup flow, mutated only through the reducer, and replaced
//! wholesale in the remote store on every persisted edit. Serde field names
//! follow the wire spelling of the remote documents so that the other display
//! surfaces polling the same collection keep working unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which batsman slot is facing the next delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Batsman {
    A,
    B,
}

impl Batsman {
    /// The other slot.
    pub fn other(self) -> Self {
        match self {
            Batsman::A => Batsman::B,
            Batsman::B => Batsman::A,
        }
    }
}

/// A single token in the over tracker.
///
/// Serialized as the short codes the scoreboard displays: `"0"`–`"6"` for
/// runs off the bat, `"W"` for a wicket, `"Wd"`/`"Nb"`/`"Lb"`/`"B"` for
/// extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ball {
    /// Runs scored off the bat (0–6).
    Runs(u8),
    Wicket,
    Wide,
    NoBall,
    LegBye,
    Bye,
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ball::Runs(n) => write!(f, "{n}"),
            Ball::Wicket => write!(f, "W"),
            Ball::Wide => write!(f, "Wd"),
            Ball::NoBall => write!(f, "Nb"),
            Ball::LegBye => write!(f, "Lb"),
            Ball::Bye => write!(f, "B"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized ball token: {0:?}")]
pub struct ParseBallError(pub String);

impl FromStr for Ball {
    type Err = ParseBallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "W" => Ok(Ball::Wicket),
            "Wd" => Ok(Ball::Wide),
            "Nb" => Ok(Ball::NoBall),
            "Lb" => Ok(Ball::LegBye),
            "B" => Ok(Ball::Bye),
            other => match other.parse::<u8>() {
                Ok(n) if n <= 6 => Ok(Ball::Runs(n)),
                _ => Err(ParseBallError(other.to_string())),
            },
        }
    }
}

impl Serialize for Ball {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ball {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// The extras ledger. All counters are cumulative for the innings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub leg_byes: u32,
    pub byes: u32,
}

impl Extras {
    /// Total extras conceded so far.
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.leg_byes + self.byes
    }
}

/// The authoritative match record.
///
/// `balls` counts legal deliveries only; the partial over a bowler is into is
/// `balls % 6` with `bowler_overs` holding the completed count. `this_over`
/// is cleared every time an over completes. `target > 0` marks the second
/// innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub id: String,

    pub team_a: String,
    pub team_b: String,
    pub batting_team: String,

    pub total_run: u32,
    pub total_wicket: u32,
    pub balls: u32,
    #[serde(default)]
    pub this_over: Vec<Ball>,
    pub on_strike: Batsman,

    pub batsmen_a: String,
    pub batsmen_b: String,
    pub batsman_a_score: u32,
    pub batsman_a_balls: u32,
    pub batsman_b_score: u32,
    pub batsman_b_balls: u32,

    pub bowler: String,
    pub bowler_runs: u32,
    pub bowler_wickets: u32,
    pub bowler_overs: u32,

    #[serde(default)]
    pub extras: Extras,

    #[serde(default)]
    pub target: u32,
    pub match_started: bool,

    /// Last run or wicket token, shown as the "recent ball" readout.
    /// Extras do not update it.
    #[serde(
        rename = "recentBalls",
        default,
        deserialize_with = "de_recent_ball",
        skip_serializing_if = "Option::is_none"
    )]
    pub recent_ball: Option<Ball>,

    /// Stream URL consumed by the video overlay. Carried through
    /// whole-document writes, never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl MatchState {
    /// A target has been set, so the chase is on.
    pub fn second_innings(&self) -> bool {
        self.target > 0
    }

    /// Score and balls faced for the batsman currently on strike.
    pub fn striker_figures(&self) -> (u32, u32) {
        match self.on_strike {
            Batsman::A => (self.batsman_a_score, self.batsman_a_balls),
            Batsman::B => (self.batsman_b_score, self.batsman_b_balls),
        }
    }
}

// Older documents carry `recentBalls: ""` before the first delivery; treat
// that the same as the field being absent.
fn de_recent_ball<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Ball>, D::Error> {
    let token: Option<String> = Option::deserialize(deserializer)?;
    match token.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
