use crate::analysis::recommender::{DraftContext, Recommendation};
use crate::analysis::weights::Weights;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    score: String,
    meta: String,
    player: String,
    counter: String,
    win_rate: String,
    pick_rate: String,
    ban_rate: String,
}

fn format_weights(weights: &Weights) -> String {
    format!(
        "meta {:.3} · player {:.3} · counter {:.3}",
        weights.meta, weights.player, weights.counter
    )
}

pub fn display_recommendations(recommendations: &[Recommendation], draft: &DraftContext) {
    println!("\n{}", "🎯 Pick Recommendations".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if recommendations.is_empty() {
        println!(
            "{}",
            "No pick recommendations available (no eligible champions)".yellow()
        );
        return;
    }

    let mut rows = vec![];
    for (idx, rec) in recommendations.iter().enumerate() {
        let champion = if rec.is_in_pool {
            format!("{} ★", rec.champion)
        } else {
            rec.champion.clone()
        };

        rows.push(PickRow {
            rank: format!("#{}", idx + 1),
            champion,
            score: format!("{:.1}", rec.total_score),
            meta: format!("{:.1}", rec.meta_score),
            player: format!("{:.1}", rec.player_score),
            counter: format!("{:.1}", rec.counter_score),
            win_rate: format!("{:.1}%", rec.stats.win_rate),
            pick_rate: format!("{:.1}%", rec.stats.pick_rate),
            ban_rate: format!("{:.1}%", rec.stats.ban_rate),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Weights".bold().yellow());
    println!("  {}", format_weights(&recommendations[0].weights));
    println!("  priority {} (0 = your pool, 100 = meta)", draft.priority.clamp(0, 100));
    if !draft.enemy_picks.is_empty() {
        println!("  countering {}", draft.enemy_picks.join(", "));
    }
    println!("• ★ marks champions in your pool (10+ games)\n");

    if let Some(top) = recommendations.first() {
        println!("{}", "Top Pick".bold().green());
        println!(
            "  {} with {:.1} points (meta {:.1}, pool {:.1}, counter {:.1})",
            top.champion, top.total_score, top.meta_score, top.player_score, top.counter_score
        );
        if !top.stats.counters.is_empty() {
            println!("  Strong into: {}", top.stats.counters.join(", "));
        }
        if top.counter_score >= 75.0 {
            println!("  {} Favoured matchup against the enemy picks", "🔥".red());
        } else if top.counter_score <= 25.0 {
            println!("  {} Unfavoured matchup against the enemy picks", "⚠️".yellow());
        }
    }

    println!();
}

pub fn display_recommendations_json(recommendations: &[Recommendation]) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(recommendations)?);
    Ok(())
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_render_with_three_decimals() {
        let w = Weights::compute(50, true, false);
        assert_eq!(format_weights(&w), "meta 0.570 · player 0.030 · counter 0.400");
    }
}
