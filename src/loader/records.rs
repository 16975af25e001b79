use chrono::NaiveDate;
use std::collections::HashMap;

/// One validated row of the bout log. Records are built once at load time
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BoutRecord {
    pub winner: String,
    pub loser: String,
    /// Trimmed, with legacy KO/TKO labels remapped to the canonical token.
    pub method: String,
    pub date: Option<NaiveDate>,
    pub weight_class: Option<String>,
    pub round: Option<u32>,
    pub time_minutes: Option<f64>,
    pub winner_strikes_landed: Option<u32>,
    pub winner_strikes_attempted: Option<u32>,
    pub winner_takedowns: Option<u32>,
    pub winner_takedown_attempts: Option<u32>,
    pub loser_strikes_landed: Option<u32>,
    pub loser_strikes_attempted: Option<u32>,
    pub loser_takedowns: Option<u32>,
    pub loser_takedown_attempts: Option<u32>,
}

/// Which optional columns the source file carries. Checked once per load;
/// optionality is a property of the whole table, never of single rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnPresence {
    pub date: bool,
    pub weight_class: bool,
    pub round: bool,
    pub time_minutes: bool,
    /// The four winner_* figures travel as one group, keyed off
    /// winner_strikes_landed. Same for the loser mirror.
    pub winner_stats: bool,
    pub loser_stats: bool,
}

/// The canonical, read-only table every downstream query runs against.
#[derive(Debug, Clone)]
pub struct BoutTable {
    pub bouts: Vec<BoutRecord>,
    pub columns: ColumnPresence,
}

impl BoutTable {
    pub fn len(&self) -> usize {
        self.bouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bouts.is_empty()
    }

    /// Sorted distinct names across both sides of every bout.
    pub fn fighter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .bouts
            .iter()
            .flat_map(|bout| [bout.winner.clone(), bout.loser.clone()])
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Method label frequencies, most common first, ties alphabetical.
    pub fn method_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for bout in &self.bouts {
            *counts.entry(bout.method.clone()).or_insert(0) += 1;
        }

        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Earliest and latest bout dates, when the table carries dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.bouts.iter().filter_map(|bout| bout.date);
        let first = dates.next()?;
        let (earliest, latest) = dates.fold((first, first), |(lo, hi), date| {
            (lo.min(date), hi.max(date))
        });
        Some((earliest, latest))
    }
}

/// Load output: the canonical table plus row-drop counters so callers can
/// report how much of the source survived validation.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub table: BoutTable,
    pub dropped_invalid_dates: usize,
    pub dropped_missing_names: usize,
}

impl LoadReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped_invalid_dates + self.dropped_missing_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bout(winner: &str, loser: &str, method: &str) -> BoutRecord {
        BoutRecord {
            winner: winner.to_string(),
            loser: loser.to_string(),
            method: method.to_string(),
            date: None,
            weight_class: None,
            round: None,
            time_minutes: None,
            winner_strikes_landed: None,
            winner_strikes_attempted: None,
            winner_takedowns: None,
            winner_takedown_attempts: None,
            loser_strikes_landed: None,
            loser_strikes_attempted: None,
            loser_takedowns: None,
            loser_takedown_attempts: None,
        }
    }

    fn table(bouts: Vec<BoutRecord>) -> BoutTable {
        BoutTable {
            bouts,
            columns: ColumnPresence::default(),
        }
    }

    #[test]
    fn fighter_names_are_sorted_and_distinct() {
        let table = table(vec![
            bout("Silva", "Reyes", "KO/TKO"),
            bout("Reyes", "Adams", "Decision - Unanimous"),
            bout("Silva", "Adams", "KO/TKO"),
        ]);

        assert_eq!(table.fighter_names(), vec!["Adams", "Reyes", "Silva"]);
    }

    #[test]
    fn method_counts_order_by_frequency_then_name() {
        let table = table(vec![
            bout("A", "B", "KO/TKO"),
            bout("C", "D", "KO/TKO"),
            bout("E", "F", "Decision - Unanimous"),
            bout("G", "H", "Submission (Armbar)"),
        ]);

        let counts = table.method_counts();
        assert_eq!(counts[0], ("KO/TKO".to_string(), 2));
        assert_eq!(counts[1], ("Decision - Unanimous".to_string(), 1));
        assert_eq!(counts[2], ("Submission (Armbar)".to_string(), 1));
    }

    #[test]
    fn date_range_spans_earliest_to_latest() {
        let mut first = bout("A", "B", "KO/TKO");
        first.date = NaiveDate::from_ymd_opt(2019, 5, 4);
        let mut second = bout("C", "D", "KO/TKO");
        second.date = NaiveDate::from_ymd_opt(2023, 11, 12);
        let mut third = bout("E", "F", "KO/TKO");
        third.date = NaiveDate::from_ymd_opt(2021, 2, 1);

        let table = table(vec![second, first, third]);
        let (earliest, latest) = table.date_range().unwrap();
        assert_eq!(earliest, NaiveDate::from_ymd_opt(2019, 5, 4).unwrap());
        assert_eq!(latest, NaiveDate::from_ymd_opt(2023, 11, 12).unwrap());
    }

    #[test]
    fn date_range_is_none_without_dates() {
        let table = table(vec![bout("A", "B", "KO/TKO")]);
        assert!(table.date_range().is_none());
    }
}
