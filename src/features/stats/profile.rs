//! Halo MCC service record model
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Unknown `last20` entries are kept and skipped instead of failing the record

use serde::{Deserialize, Serialize};

/// Outcome of a single game in the trailing window
///
/// Encoded on the wire as `1` (win) or `-1` (loss). Any other value is kept
/// as `Other` and counts as neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum GameResult {
    Loss,
    Win,
    Other(i64),
}

impl From<i64> for GameResult {
    fn from(value: i64) -> Self {
        match value {
            1 => GameResult::Win,
            -1 => GameResult::Loss,
            other => GameResult::Other(other),
        }
    }
}

impl From<GameResult> for i64 {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Win => 1,
            GameResult::Loss => -1,
            GameResult::Other(value) => value,
        }
    }
}

/// Win/loss counts over the trailing window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecentRecord {
    pub wins: usize,
    pub losses: usize,
}

/// Player service record returned by the stats API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub gamertag: String,
    #[serde(default)]
    pub clantag: String,
    #[serde(default)]
    pub emblem: String,
    pub playtime: String,
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_ratio: f64,
    pub kills: u64,
    pub deaths: u64,
    pub kill_death_ratio: f64,
    pub kills_per_game: f64,
    pub deaths_per_game: f64,
    /// Most recent games, newest first
    #[serde(rename = "last20", default)]
    pub recent_games: Vec<GameResult>,
    #[serde(default)]
    pub streak: String,
}

impl ProfileRecord {
    /// Size of the trailing window the API reports
    pub const RECENT_WINDOW: usize = 20;

    pub fn recent_record(&self) -> RecentRecord {
        self.recent_games
            .iter()
            .take(Self::RECENT_WINDOW)
            .fold(RecentRecord::default(), |mut record, result| {
                match result {
                    GameResult::Win => record.wins += 1,
                    GameResult::Loss => record.losses += 1,
                    GameResult::Other(_) => {}
                }
                record
            })
    }

    /// "Gamertag [CLAN]", or just the gamertag when there is no clan
    pub fn display_name(&self) -> String {
        if self.clantag.trim().is_empty() {
            self.gamertag.clone()
        } else {
            format!("{} [{}]", self.gamertag, self.clantag)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(gamertag: &str) -> ProfileRecord {
    use GameResult::{Loss, Win};
    ProfileRecord {
        gamertag: gamertag.to_string(),
        clantag: "JNSN".to_string(),
        emblem: "https://example.com/emblem.png".to_string(),
        playtime: "12d 4h".to_string(),
        games_played: 1200,
        wins: 700,
        losses: 500,
        win_ratio: 1.4,
        kills: 15000,
        deaths: 12000,
        kill_death_ratio: 1.25,
        kills_per_game: 12.5,
        deaths_per_game: 10.0,
        recent_games: vec![
            Win, Win, Loss, Win, Loss, Win, Win, Win, Loss, Win, Loss, Loss, Win, Win, Win, Loss,
            Win, Win, Loss, Win,
        ],
        streak: "2 Wins".to_string(),
    }
}
