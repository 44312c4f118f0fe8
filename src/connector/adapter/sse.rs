use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::Stream;
use serde::Deserialize;
use tracing::debug;

use crate::application::FragmentStream;
use crate::domain::GatewayError;

const DATA_PREFIX: &str = "data: ";
const TERMINAL_MARKER: &str = "[DONE]";

/// Minimal subset of one streamed completion chunk.
#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

enum LineEvent {
    Fragment(String),
    Done,
    Skip,
}

/// Incremental decoder for the `data: `-framed streaming body.
///
/// Transport chunks do not align with line boundaries, so bytes are buffered
/// until a full line terminator is seen; the trailing partial segment carries
/// over to the next chunk. Lines without the `data: ` prefix (keep-alives,
/// blanks) are ignored. A payload of `[DONE]` terminates the stream and
/// discards whatever partial line is still buffered. Malformed JSON payloads
/// are skipped silently — providers emit them with keep-alive or partial
/// frames, and tolerating them is part of the contract, not an error path.
pub(crate) struct SseLineDecoder {
    buf: Vec<u8>,
    done: bool,
}

impl SseLineDecoder {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::new(),
            done: false,
        }
    }

    /// Whether the terminal marker has been observed.
    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one transport chunk, returning the fragments decoded from every
    /// line it completed, in arrival order.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut fragments = Vec::new();
        if self.done {
            return fragments;
        }

        self.buf.extend_from_slice(chunk);

        let mut consumed = 0;
        while let Some(pos) = self.buf[consumed..].iter().position(|&b| b == b'\n') {
            let end = consumed + pos;
            let line = strip_cr(&self.buf[consumed..end]);

            match Self::decode_line(line) {
                LineEvent::Fragment(text) => fragments.push(text),
                LineEvent::Done => {
                    self.done = true;
                    self.buf.clear();
                    return fragments;
                }
                LineEvent::Skip => {}
            }

            consumed = end + 1;
        }

        self.buf.drain(..consumed);
        fragments
    }

    fn decode_line(line: &[u8]) -> LineEvent {
        let Ok(text) = std::str::from_utf8(line) else {
            debug!("Skipping non-UTF-8 stream line ({} bytes)", line.len());
            return LineEvent::Skip;
        };

        let Some(payload) = text.strip_prefix(DATA_PREFIX) else {
            return LineEvent::Skip;
        };

        if payload == TERMINAL_MARKER {
            return LineEvent::Done;
        }

        match serde_json::from_str::<StreamChunk>(payload) {
            Ok(chunk) => chunk
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.delta.content)
                .filter(|content| !content.is_empty())
                .map(LineEvent::Fragment)
                .unwrap_or(LineEvent::Skip),
            Err(e) => {
                debug!("Skipping undecodable stream line: {e}");
                LineEvent::Skip
            }
        }
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Fragment stream over a live HTTP response body.
///
/// Ends normally on the terminal marker or when the connection closes; a
/// transport error mid-stream yields one `Err` and then the stream ends.
/// Dropping the value drops the response body, which aborts the underlying
/// connection — stopping iteration early never leaks the socket.
pub struct SseFragmentStream {
    bytes: BoxStream<'static, Result<Bytes, GatewayError>>,
    decoder: SseLineDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

impl SseFragmentStream {
    pub(crate) fn new(bytes: BoxStream<'static, Result<Bytes, GatewayError>>) -> Self {
        Self {
            bytes,
            decoder: SseLineDecoder::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    pub fn boxed(self) -> FragmentStream {
        Box::pin(self)
    }
}

impl Stream for SseFragmentStream {
    type Item = Result<String, GatewayError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(fragment) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(fragment)));
            }
            if this.finished {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.bytes).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    this.pending.extend(this.decoder.feed(&chunk));
                    if this.decoder.is_done() {
                        this.finished = true;
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    // Connection closed without the terminal marker; any
                    // buffered partial line is discarded.
                    this.finished = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
