use crate::analysis::method;
use crate::loader::records::{BoutRecord, BoutTable};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoutResult {
    Win,
    Loss,
}

/// One bout seen from a single fighter's corner. Stat figures come from
/// that fighter's side of the record, zero-filled when the source table
/// never carried the columns.
#[derive(Debug, Clone, Serialize)]
pub struct PerspectiveBout {
    pub date: Option<NaiveDate>,
    pub opponent: String,
    pub result: BoutResult,
    pub method: String,
    pub weight_class: Option<String>,
    pub round: Option<u32>,
    pub time_minutes: Option<f64>,
    pub strikes_landed: u32,
    pub strikes_attempted: u32,
    pub takedowns: u32,
    pub takedown_attempts: u32,
}

/// Career summary for one fighter, recomputed from the table on every
/// query. Rates are percentages in [0, 100].
#[derive(Debug, Clone, Serialize)]
pub struct FighterCareerStats {
    pub name: String,
    pub total_fights: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub ko_wins: usize,
    pub submission_wins: usize,
    pub ko_rate: f64,
    pub submission_rate: f64,
    pub strike_accuracy: f64,
    pub takedown_accuracy: f64,
    pub avg_fight_time: f64,
    pub bouts: Vec<PerspectiveBout>,
}

impl FighterCareerStats {
    /// Wins that matched neither finish pattern. A method matching both
    /// patterns would push the raw residual negative, so it saturates
    /// at zero.
    pub fn decision_wins(&self) -> usize {
        self.wins.saturating_sub(self.ko_wins + self.submission_wins)
    }
}

/// Build the career summary for one fighter, or nothing if the name
/// never appears on either side of the table.
pub fn aggregate(table: &BoutTable, name: &str) -> Option<FighterCareerStats> {
    let win_rows: Vec<&BoutRecord> = table.bouts.iter().filter(|b| b.winner == name).collect();
    let loss_rows: Vec<&BoutRecord> = table.bouts.iter().filter(|b| b.loser == name).collect();
    if win_rows.is_empty() && loss_rows.is_empty() {
        return None;
    }

    let wins = win_rows.len();
    let losses = loss_rows.len();
    let total_fights = wins + losses;

    // Finish counts only ever look at the win side.
    let mut ko_wins = 0;
    let mut submission_wins = 0;
    for bout in &win_rows {
        let flags = method::classify(&bout.method);
        if flags.is_ko {
            ko_wins += 1;
        }
        if flags.is_submission {
            submission_wins += 1;
        }
    }

    let mut bouts: Vec<PerspectiveBout> = Vec::with_capacity(total_fights);
    bouts.extend(win_rows.iter().map(|bout| perspective(bout, BoutResult::Win)));
    bouts.extend(loss_rows.iter().map(|bout| perspective(bout, BoutResult::Loss)));
    if table.columns.date {
        // Stable sort keeps the wins-then-losses order within a day.
        bouts.sort_by_key(|bout| bout.date);
    }

    let strikes_landed: u64 = bouts.iter().map(|b| u64::from(b.strikes_landed)).sum();
    let strikes_attempted: u64 = bouts.iter().map(|b| u64::from(b.strikes_attempted)).sum();
    let takedowns: u64 = bouts.iter().map(|b| u64::from(b.takedowns)).sum();
    let takedown_attempts: u64 = bouts.iter().map(|b| u64::from(b.takedown_attempts)).sum();

    let recorded_times: Vec<f64> = bouts.iter().filter_map(|b| b.time_minutes).collect();
    let avg_fight_time = if recorded_times.is_empty() {
        0.0
    } else {
        recorded_times.iter().sum::<f64>() / recorded_times.len() as f64
    };

    Some(FighterCareerStats {
        name: name.to_string(),
        total_fights,
        wins,
        losses,
        win_rate: ratio_pct(wins as f64, total_fights as f64),
        ko_wins,
        submission_wins,
        ko_rate: ratio_pct(ko_wins as f64, wins as f64),
        submission_rate: ratio_pct(submission_wins as f64, wins as f64),
        strike_accuracy: ratio_pct(strikes_landed as f64, strikes_attempted as f64),
        takedown_accuracy: ratio_pct(takedowns as f64, takedown_attempts as f64),
        avg_fight_time,
        bouts,
    })
}

fn perspective(bout: &BoutRecord, result: BoutResult) -> PerspectiveBout {
    let (opponent, strikes_landed, strikes_attempted, takedowns, takedown_attempts) = match result
    {
        BoutResult::Win => (
            bout.loser.clone(),
            bout.winner_strikes_landed,
            bout.winner_strikes_attempted,
            bout.winner_takedowns,
            bout.winner_takedown_attempts,
        ),
        BoutResult::Loss => (
            bout.winner.clone(),
            bout.loser_strikes_landed,
            bout.loser_strikes_attempted,
            bout.loser_takedowns,
            bout.loser_takedown_attempts,
        ),
    };

    PerspectiveBout {
        date: bout.date,
        opponent,
        result,
        method: bout.method.clone(),
        weight_class: bout.weight_class.clone(),
        round: bout.round,
        time_minutes: bout.time_minutes,
        strikes_landed: strikes_landed.unwrap_or(0),
        strikes_attempted: strikes_attempted.unwrap_or(0),
        takedowns: takedowns.unwrap_or(0),
        takedown_attempts: takedown_attempts.unwrap_or(0),
    }
}

fn ratio_pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
