use offerscout_core::Offer;
use scout_logging::{engine_debug, engine_warn};

/// Incremental splitter for a newline-delimited stream delivered in
/// arbitrarily sized chunks.
///
/// Holds only the trailing partial fragment between pushes; chunk boundaries
/// inside a line or even inside a UTF-8 sequence are harmless because the
/// carry-over is kept as raw bytes.
#[derive(Debug, Default)]
pub struct NdjsonSplitter {
    buffer: Vec<u8>,
}

impl NdjsonSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns every line completed by it, trimmed, with
    /// empty lines skipped. The piece after the last newline stays buffered.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let Some(last_newline) = self.buffer.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };
        let complete: Vec<u8> = self.buffer.drain(..=last_newline).collect();

        complete
            .split(|&b| b == b'\n')
            .filter_map(|line| match std::str::from_utf8(line) {
                Ok(text) => {
                    let text = text.trim();
                    (!text.is_empty()).then(|| text.to_string())
                }
                Err(err) => {
                    engine_warn!("dropping non-UTF-8 stream line: {err}");
                    None
                }
            })
            .collect()
    }

    /// Consumes the splitter at end of stream. The leftover is by
    /// construction an incomplete trailing fragment and must not be parsed;
    /// it is returned only so the caller can log its length.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

/// Parses complete NDJSON lines into [`Offer`]s as chunks arrive.
///
/// A line that fails to parse is logged and dropped; the stream continues.
#[derive(Debug, Default)]
pub struct OfferDecoder {
    splitter: NdjsonSplitter,
}

impl OfferDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns the offers whose records it completed,
    /// in arrival order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Offer> {
        self.splitter
            .push(chunk)
            .into_iter()
            .filter_map(|line| match serde_json::from_str::<Offer>(&line) {
                Ok(offer) => Some(offer),
                Err(err) => {
                    engine_warn!("dropping malformed offer record: {err}");
                    None
                }
            })
            .collect()
    }

    /// Discards any trailing fragment at end of stream.
    pub fn finish(self) {
        let leftover = self.splitter.finish();
        if !leftover.is_empty() {
            engine_debug!(
                "discarding {} bytes of incomplete trailing record",
                leftover.len()
            );
        }
    }
}
