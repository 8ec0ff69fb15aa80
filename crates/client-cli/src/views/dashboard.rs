//! HR dashboard: the `/stats/hr` aggregates rendered as a terminal summary.

use anyhow::Result;
use shared::HrStats;

use crate::term;

use super::{cell, Ctx};

pub const ENDPOINT: &str = "/stats/hr";

const BAR_WIDTH: usize = 24;

/// Proportional bar for the breakdown rows; zero maximum renders empty.
fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

fn render(stats: &HrStats) {
    println!("\x1b[1mDashboard\x1b[0m");
    println!("  Total assets      {}", stats.total_assets);
    println!("  Total requests    {}", stats.total_requests);
    println!("  Pending requests  {}", stats.pending_requests);
    println!(
        "  Team              {}/{} employees",
        stats.employee_count, stats.employee_limit
    );
    if stats.employee_count >= stats.employee_limit {
        term::warn("Your team is at its package limit; approvals will be blocked.");
        term::notice("Run 'assetverse packages' to compare tiers.");
    }

    let type_max = stats.returnable_assets.max(stats.non_returnable_assets);
    if type_max > 0 {
        println!();
        println!("\x1b[1mAssets by type\x1b[0m");
        println!(
            "  {} {} {}",
            cell("Returnable", 16),
            cell(&stats.returnable_assets.to_string(), 6),
            bar(stats.returnable_assets, type_max, BAR_WIDTH),
        );
        println!(
            "  {} {} {}",
            cell("Non-returnable", 16),
            cell(&stats.non_returnable_assets.to_string(), 6),
            bar(stats.non_returnable_assets, type_max, BAR_WIDTH),
        );
    }

    if !stats.top_requested.is_empty() {
        let top_max = stats
            .top_requested
            .iter()
            .map(|t| t.count)
            .max()
            .unwrap_or(0);
        println!();
        println!("\x1b[1mMost requested\x1b[0m");
        for item in &stats.top_requested {
            println!(
                "  {} {} {}",
                cell(&item.name, 20),
                cell(&item.count.to_string(), 6),
                bar(item.count, top_max, BAR_WIDTH),
            );
        }
    }
}

pub async fn stats(ctx: &Ctx) -> Result<()> {
    match ctx.secure.get::<HrStats>(ENDPOINT).await {
        Ok(stats) => render(&stats),
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(4, 4, 8).chars().count(), 8);
        assert_eq!(bar(2, 4, 8).chars().count(), 4);
        assert_eq!(bar(0, 4, 8), "");
    }

    #[test]
    fn test_bar_zero_max_is_empty() {
        assert_eq!(bar(0, 0, 8), "");
    }

    #[test]
    fn test_bar_never_exceeds_width() {
        assert!(bar(1000, 1, 8).chars().count() <= 8);
    }
}
