//! Dashboard Walkthrough Example
//!
//! Drives a viewer session through the same steps a user takes in the UI:
//! pick a ticker, adjust the window, execute, inspect the tabs, export.

use synthstock::api::formatters::{format_dashboard, format_metrics};
use synthstock::api::{session_csv, DashboardView};
use synthstock::state_machine::{SessionEvent, SessionMachine};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    synthstock::init_logger()?;

    println!("📈 Dashboard Walkthrough");
    println!("{}", "=".repeat(60));

    let mut machine = SessionMachine::new();

    // Before execution the view only carries the placeholder
    let idle = DashboardView::from_state(machine.state())?;
    println!("\n{}", format_dashboard(&idle));

    println!("\n🔧 Selecting NVDA with a 10-day window over January 2021");
    machine.handle(SessionEvent::TickerChanged {
        ticker: "NVDA".to_string(),
    })?;
    machine.handle(SessionEvent::RangeChanged {
        start: chrono::NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad date")?,
        end: chrono::NaiveDate::from_ymd_opt(2021, 1, 31).ok_or("bad date")?,
    })?;
    machine.handle(SessionEvent::WindowChanged { window: 10 })?;
    machine.handle(SessionEvent::Execute)?;

    let view = DashboardView::from_state(machine.state())?;
    println!("\n{}", format_dashboard(&view));

    if let Some(tabs) = &view.tabs {
        println!("\n📊 Stats tab");
        println!("{}", format_metrics(&tabs.stats));
    }

    // Changing the window keeps the plot and only refreshes the MA column
    println!("\n🔁 Switching to a 5-day window");
    machine.handle(SessionEvent::WindowChanged { window: 5 })?;
    if let Some(series) = &machine.state().series {
        let defined = series.moving_averages().iter().filter(|ma| ma.is_some()).count();
        println!("✅ {} of {} days now carry a moving average", defined, series.len());
    }

    let (file_name, bytes) = session_csv(machine.state())?;
    println!("\n💾 {} would download {} bytes", file_name, bytes.len());

    println!("\n🧾 Transition history");
    for entry in machine.transition_history() {
        println!("  {} -> {} ({})", entry.from, entry.to, entry.reason);
    }

    Ok(())
}
