use crate::analysis::fighter_stats::{BoutResult, FighterCareerStats};
use crate::loader::records::LoadReport;
use colored::*;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StatRow {
    metric: String,
    value: String,
}

#[derive(Tabled)]
struct FightRow {
    date: String,
    opponent: String,
    result: String,
    method: String,
    round: String,
    #[tabled(rename = "time (min)")]
    time: String,
}

#[derive(Tabled)]
struct MethodRow {
    method: String,
    bouts: String,
    share: String,
}

pub fn display_fighter_card(stats: &FighterCareerStats) {
    println!("\n{}", format!("🥊 {} ", stats.name).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "{} {} W / {} L ({:.1}% WR)\n",
        "📈 Record:".bold(),
        stats.wins.to_string().green(),
        stats.losses.to_string().red(),
        stats.win_rate
    );

    let rows = vec![
        StatRow {
            metric: "Total Fights".to_string(),
            value: format!("{}", stats.total_fights),
        },
        StatRow {
            metric: "Win Rate (%)".to_string(),
            value: format!("{:.1}", stats.win_rate),
        },
        StatRow {
            metric: "KO/TKO Wins".to_string(),
            value: format!("{}", stats.ko_wins),
        },
        StatRow {
            metric: "Submission Wins".to_string(),
            value: format!("{}", stats.submission_wins),
        },
        StatRow {
            metric: "Strike Accuracy (%)".to_string(),
            value: format!("{:.1}", stats.strike_accuracy),
        },
        StatRow {
            metric: "Takedown Accuracy (%)".to_string(),
            value: format!("{:.1}", stats.takedown_accuracy),
        },
        StatRow {
            metric: "Avg Fight Time (min)".to_string(),
            value: format!("{:.1}", stats.avg_fight_time),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_comparison(first: &FighterCareerStats, second: &FighterCareerStats) {
    println!(
        "\n{}",
        format!("⚔️  {} vs {}", first.name, second.name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let mut builder = Builder::default();
    builder.push_record(vec![
        "Metric".to_string(),
        first.name.clone(),
        second.name.clone(),
    ]);
    let mut push = |label: &str, a: String, b: String| {
        builder.push_record(vec![label.to_string(), a, b]);
    };

    push(
        "Total Fights",
        format!("{}", first.total_fights),
        format!("{}", second.total_fights),
    );
    push(
        "Wins",
        format!("{}", first.wins),
        format!("{}", second.wins),
    );
    push(
        "Losses",
        format!("{}", first.losses),
        format!("{}", second.losses),
    );
    push(
        "Win Rate (%)",
        format!("{:.1}", first.win_rate),
        format!("{:.1}", second.win_rate),
    );
    push(
        "KO/TKO Wins",
        format!("{}", first.ko_wins),
        format!("{}", second.ko_wins),
    );
    push(
        "Submission Wins",
        format!("{}", first.submission_wins),
        format!("{}", second.submission_wins),
    );
    push(
        "Strike Accuracy (%)",
        format!("{:.1}", first.strike_accuracy),
        format!("{:.1}", second.strike_accuracy),
    );
    push(
        "Takedown Accuracy (%)",
        format!("{:.1}", first.takedown_accuracy),
        format!("{:.1}", second.takedown_accuracy),
    );
    push(
        "Avg Fight Time (min)",
        format!("{:.1}", first.avg_fight_time),
        format!("{:.1}", second.avg_fight_time),
    );

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_insights(first: &FighterCareerStats, second: &FighterCareerStats) {
    println!("\n{}", "💡 MATCHUP INSIGHTS".bold().yellow());

    let (name, high, low) = leader(first, second, |stats| stats.win_rate);
    println!(
        "  🏆 {} holds the higher win rate ({:.1}% vs {:.1}%)",
        name.bold(),
        high,
        low
    );

    let (name, high, low) = leader(first, second, |stats| stats.strike_accuracy);
    println!(
        "  🎯 {} lands strikes more accurately ({:.1}% vs {:.1}%)",
        name.bold(),
        high,
        low
    );

    let (name, high, low) = leader(first, second, |stats| stats.ko_rate);
    println!(
        "  💥 {} finishes by KO/TKO more often ({:.1}% vs {:.1}%)",
        name.bold(),
        high,
        low
    );

    println!();
}

// Ties go to the second fighter.
fn leader<'a>(
    first: &'a FighterCareerStats,
    second: &'a FighterCareerStats,
    metric: impl Fn(&FighterCareerStats) -> f64,
) -> (&'a str, f64, f64) {
    let a = metric(first);
    let b = metric(second);
    if a > b {
        (first.name.as_str(), a, b)
    } else {
        (second.name.as_str(), b, a)
    }
}

pub fn display_method_breakdown(stats: &FighterCareerStats) {
    println!("\n{}", "🧮 WIN METHODS".bold().yellow());
    if stats.wins == 0 {
        println!("  {}", "No wins on record".yellow());
        println!();
        return;
    }

    let decisions = stats.decision_wins();
    let decision_rate = decisions as f64 / stats.wins as f64 * 100.0;
    println!(
        "  💥 KO/TKO: {} ({:.1}% of wins)",
        stats.ko_wins, stats.ko_rate
    );
    println!(
        "  🤼 Submission: {} ({:.1}% of wins)",
        stats.submission_wins, stats.submission_rate
    );
    println!("  📋 Decision: {} ({:.1}% of wins)", decisions, decision_rate);
    println!();
}

pub fn display_fight_history(stats: &FighterCareerStats, limit: usize) {
    let shown = limit.min(stats.bouts.len());
    println!(
        "\n{}",
        format!("📊 FIGHT HISTORY: {} (Last {} Bouts)", stats.name, shown)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    let mut rows = vec![];
    for bout in stats.bouts.iter().rev().take(limit) {
        let result = match bout.result {
            BoutResult::Win => "WIN".green().to_string(),
            BoutResult::Loss => "LOSS".red().to_string(),
        };

        rows.push(FightRow {
            date: bout
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            opponent: bout.opponent.clone(),
            result,
            method: bout.method.clone(),
            round: bout
                .round
                .map(|round| round.to_string())
                .unwrap_or_else(|| "-".to_string()),
            time: bout
                .time_minutes
                .map(|time| format!("{:.1}", time))
                .unwrap_or_else(|| "-".to_string()),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_dataset_summary(report: &LoadReport) {
    let table = &report.table;
    println!("\n{}", "📂 DATASET OVERVIEW".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!("• {} bouts on record", table.len());
    println!("• {} fighters", table.fighter_names().len());
    if let Some((earliest, latest)) = table.date_range() {
        println!(
            "• spanning {} to {}",
            earliest.format("%Y-%m-%d"),
            latest.format("%Y-%m-%d")
        );
    }
    if report.dropped_invalid_dates > 0 {
        display_warning(&format!(
            "{} rows dropped (unparsable date)",
            report.dropped_invalid_dates
        ));
    }
    if report.dropped_missing_names > 0 {
        display_warning(&format!(
            "{} rows dropped (missing fighter name)",
            report.dropped_missing_names
        ));
    }
}

pub fn display_fighter_list(names: &[String]) {
    println!(
        "\n{}",
        format!("🥋 FIGHTERS ON RECORD ({})", names.len()).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    for (idx, name) in names.iter().enumerate() {
        println!("{:>4}. {}", idx + 1, name);
    }
    println!();
}

pub fn display_method_counts(counts: &[(String, usize)]) {
    println!("\n{}", "🧾 FINISH METHODS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let mut rows = vec![];
    for (method, count) in counts {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64 * 100.0
        };
        rows.push(MethodRow {
            method: method.clone(),
            bouts: format!("{}", count),
            share: format!("{:.1}%", share),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
