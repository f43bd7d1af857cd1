//! Statistics reporting.

use console::style;

use crate::download::{SessionOutcome, SessionState};

/// Print the final statistics of a session.
pub fn print_session_stats(outcome: &SessionOutcome) {
    let stats = &outcome.stats;
    let headline = match &outcome.state {
        SessionState::Completed => style(format!(
            "Download complete: {} posts, total {}",
            stats.posts_processed, outcome.size
        ))
        .green()
        .bold(),
        SessionState::Cancelled => style("Stopped by user".to_string()).yellow().bold(),
        SessionState::Failed(message) => style(format!("Failed: {}", message)).red().bold(),
        other => style(format!("{:?}", other)).bold(),
    };

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", headline);
    println!("  Posts:      {} processed of {} found", stats.posts_processed, stats.posts_found);
    println!("  Downloaded: {}", stats.images_downloaded);
    println!("  Skipped:    {} (already on disk)", stats.images_skipped);
    if stats.images_failed > 0 {
        println!("  Failed:     {}", style(stats.images_failed).red());
    }
    println!("  Total size: {}", outcome.size);
    println!("  Saved to:   {}", outcome.save_path.display());
    println!("{}", style("═".repeat(50)).dim());
}
