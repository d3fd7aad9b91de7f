mod cli;
mod driver;
mod render;

use std::process::ExitCode;

use clap::Parser;
use offerscout_core::{AppState, Msg, SearchPhase};
use offerscout_engine::{EngineHandle, FetchSettings};
use scout_logging::LogDestination;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    scout_logging::initialize(if args.verbose {
        LogDestination::Both
    } else {
        LogDestination::File
    });

    let (address, filters) = args.restore_state();
    let settings = FetchSettings {
        base_url: args.base_url.clone(),
        ..FetchSettings::default()
    };
    let engine = EngineHandle::new(settings);
    let mut driver = driver::Driver::new(AppState::restore(address, filters), engine);

    driver.dispatch(Msg::SearchRequested);
    if let Some(error) = driver.view().error {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    driver.run_search_to_end();

    if matches!(driver.view().phase, SearchPhase::Failed(_)) {
        if let Some(error) = driver.view().error {
            eprintln!("{error}");
        }
        return ExitCode::FAILURE;
    }

    if args.page > 1 {
        driver.dispatch(Msg::PageChanged(args.page));
    }

    let view = driver.view();
    render::results(&view);
    println!();
    println!("Bookmarkable search: ?{}", view.query);

    if args.share {
        driver.run_share_request();
    }

    ExitCode::SUCCESS
}
