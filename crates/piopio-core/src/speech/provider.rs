//! SpeechProvider trait definition.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use piopio_types::speech::{SpeechError, SpeechRequest};

/// Binary audio streamed back from a speech upstream.
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes, SpeechError>> + Send + 'static>>;

/// Trait for text-to-speech backends.
///
/// `synthesize` resolves once the upstream has accepted the request; the
/// returned stream then yields the audio payload chunk by chunk.
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    fn synthesize(
        &self,
        request: &SpeechRequest,
    ) -> impl Future<Output = Result<AudioStream, SpeechError>> + Send;
}
