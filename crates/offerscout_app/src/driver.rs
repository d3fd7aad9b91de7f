use std::thread;
use std::time::Duration;

use offerscout_core::{update, AppState, Effect, Msg, ResultsView, SearchPhase};
use offerscout_engine::{EngineEvent, EngineHandle};
use scout_logging::engine_info;

/// Owns the application state and the engine, and closes the loop between
/// them: messages go through the reducer, effects go to the engine, engine
/// events come back as messages.
pub struct Driver {
    state: AppState,
    engine: EngineHandle,
    share_resolved: bool,
}

impl Driver {
    pub fn new(state: AppState, engine: EngineHandle) -> Self {
        Self {
            state,
            engine,
            share_resolved: false,
        }
    }

    pub fn view(&self) -> ResultsView {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartSearch {
                    generation,
                    address,
                } => self.engine.start_search(generation, address),
                Effect::RequestShareUrl {
                    epoch,
                    offers,
                    filters,
                } => self.engine.request_share(epoch, offers, filters),
                Effect::ShareUrlAvailable { url } => {
                    self.share_resolved = true;
                    println!("Share link: {url}");
                }
                Effect::ShareUnavailable { message } => {
                    self.share_resolved = true;
                    eprintln!("Could not create share link: {message}");
                }
            }
        }
    }

    /// Pumps engine events until the current search's stream ends, showing
    /// the summary line as it grows.
    pub fn run_search_to_end(&mut self) {
        loop {
            match self.state.phase() {
                SearchPhase::Streaming => {}
                _ => break,
            }
            if let Some(event) = self.engine.try_recv() {
                self.dispatch(msg_for(event));
                if self.state.consume_dirty() {
                    if let SearchPhase::Streaming = self.state.phase() {
                        eprint!("\r{}", self.state.view().summary());
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        }
        eprintln!();
        engine_info!("search settled in phase {:?}", self.state.phase());
    }

    /// Requests a share link and blocks until the outcome was printed.
    pub fn run_share_request(&mut self) {
        self.share_resolved = false;
        self.dispatch(Msg::ShareRequested);
        while !self.share_resolved {
            if let Some(event) = self.engine.try_recv() {
                self.dispatch(msg_for(event));
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        }
    }
}

fn msg_for(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::OfferReceived { generation, offer } => {
            Msg::OfferIngested { generation, offer }
        }
        EngineEvent::SearchCompleted { generation } => Msg::StreamFinished { generation },
        EngineEvent::SearchFailed { generation, error } => Msg::SearchFailed {
            generation,
            failure: error.into(),
        },
        EngineEvent::ShareCompleted { epoch, result } => match result {
            Ok(url) => Msg::ShareUrlReady { epoch, url },
            Err(error) => Msg::ShareFailed {
                epoch,
                message: error.to_string(),
            },
        },
    }
}
