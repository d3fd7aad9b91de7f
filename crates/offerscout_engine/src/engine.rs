use std::sync::{mpsc, Arc};
use std::thread;

use offerscout_core::{Address, FilterState, Offer};
use scout_logging::engine_info;

use crate::fetch::{ChannelEventSink, FetchSettings, HttpOfferSource, OfferSource};
use crate::share::{HttpShareClient, ShareClient};
use crate::EngineEvent;

enum EngineCommand {
    StartSearch {
        generation: u64,
        address: Address,
    },
    RequestShare {
        epoch: u64,
        offers: Vec<Offer>,
        filters: FilterState,
    },
}

/// Handle to the engine's background thread, which owns a Tokio runtime.
///
/// Commands go in over a channel; [`EngineEvent`]s come back the same way,
/// so the synchronous shell loop never blocks on the network. Starting a new
/// search aborts the previous stream task; the core's generation check is
/// what guarantees correctness, the abort only stops wasted I/O.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let source = Arc::new(HttpOfferSource::new(settings.clone()));
        let share = Arc::new(HttpShareClient::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut current_search: Option<tokio::task::JoinHandle<()>> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartSearch {
                        generation,
                        address,
                    } => {
                        if let Some(task) = current_search.take() {
                            task.abort();
                        }
                        let source = source.clone();
                        let event_tx = event_tx.clone();
                        current_search = Some(runtime.spawn(async move {
                            let sink = ChannelEventSink::new(event_tx.clone());
                            let result = source.stream_offers(generation, &address, &sink).await;
                            let event = match result {
                                Ok(()) => EngineEvent::SearchCompleted { generation },
                                Err(error) => EngineEvent::SearchFailed { generation, error },
                            };
                            let _ = event_tx.send(event);
                        }));
                    }
                    EngineCommand::RequestShare {
                        epoch,
                        offers,
                        filters,
                    } => {
                        let share = share.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = share.create_share_link(&offers, &filters).await;
                            let _ = event_tx.send(EngineEvent::ShareCompleted { epoch, result });
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn start_search(&self, generation: u64, address: Address) {
        engine_info!(
            "StartSearch generation={} plz={} city={}",
            generation,
            address.plz,
            address.city
        );
        let _ = self.cmd_tx.send(EngineCommand::StartSearch {
            generation,
            address,
        });
    }

    pub fn request_share(&self, epoch: u64, offers: Vec<Offer>, filters: FilterState) {
        engine_info!("RequestShare epoch={} offers={}", epoch, offers.len());
        let _ = self.cmd_tx.send(EngineCommand::RequestShare {
            epoch,
            offers,
            filters,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
