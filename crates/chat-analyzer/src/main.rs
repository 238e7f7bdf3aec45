mod bootstrap;

use analyzer_core::formatting::{format_weight_table, format_workout_table};
use analyzer_core::patterns::ChatPatterns;
use analyzer_core::settings::Settings;
use analyzer_data::analysis::analyze_chat;
use analyzer_ui::app::App;
use analyzer_ui::chart_view::ChartPage;
use anyhow::{Context, Result};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Chat Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    // Bad patterns are configuration errors; fail before touching the file.
    let patterns = ChatPatterns::from_settings(&settings)?;
    tracing::debug!(
        weight_pattern = patterns.weight.pattern(),
        weight_floor = ?patterns.weight.floor(),
        workout_marker = %patterns.workout_marker,
        "Patterns ready"
    );

    tracing::info!("Loading data from {}", settings.chat_file.display());
    let result = analyze_chat(&settings.chat_file, &patterns)
        .with_context(|| format!("could not analyze {}", settings.chat_file.display()))?;
    tracing::info!(
        records = result.metadata.records_parsed,
        skipped = result.metadata.lines_skipped,
        "Data loaded"
    );

    if !settings.quiet {
        println!("Workout Analysis:");
        println!("{}", format_workout_table(&result.workouts));
        println!("\nWeight Analysis:");
        println!("{}", format_weight_table(&result.weights));
    }

    if settings.no_charts {
        return Ok(());
    }

    let pages = ChartPage::build_pages(&result.workouts, &result.weights);
    if pages.is_empty() {
        tracing::info!("Nothing to chart");
        return Ok(());
    }

    tracing::info!("Plotting {} charts", pages.len());
    App::new(&settings.theme, pages)
        .run()
        .context("chart viewer failed")?;

    Ok(())
}
