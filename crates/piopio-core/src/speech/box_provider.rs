//! BoxSpeechProvider -- object-safe wrapper for SpeechProvider.

use std::future::Future;
use std::pin::Pin;

use piopio_types::speech::{SpeechError, SpeechRequest};

use super::provider::{AudioStream, SpeechProvider};

/// Object-safe version of [`SpeechProvider`] with boxed futures.
pub trait SpeechProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn synthesize_boxed<'a>(
        &'a self,
        request: &'a SpeechRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AudioStream, SpeechError>> + Send + 'a>>;
}

impl<T: SpeechProvider> SpeechProviderDyn for T {
    fn name(&self) -> &str {
        SpeechProvider::name(self)
    }

    fn synthesize_boxed<'a>(
        &'a self,
        request: &'a SpeechRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AudioStream, SpeechError>> + Send + 'a>> {
        Box::pin(self.synthesize(request))
    }
}

/// Type-erased speech provider.
pub struct BoxSpeechProvider {
    inner: Box<dyn SpeechProviderDyn + Send + Sync>,
}

impl BoxSpeechProvider {
    pub fn new<T: SpeechProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioStream, SpeechError> {
        self.inner.synthesize_boxed(request).await
    }
}
