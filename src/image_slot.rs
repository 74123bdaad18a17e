use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};

use image::DynamicImage;

use crate::api::PhotoClient;
use crate::error::FeedError;

/// A decoded image together with the display density it was decoded for.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub scale: f32,
}

impl DecodedImage {
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Size in display points: pixels divided by the scale factor.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.image.width() as f32 / self.scale,
            self.image.height() as f32 / self.scale,
        )
    }
}

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    in_flight: bool,
    /// Thread currently running a callback for this slot.
    delivering: Option<ThreadId>,
}

#[derive(Debug, Default)]
struct SlotShared {
    state: Mutex<SlotState>,
    /// Held by a worker for the whole of a callback.
    delivery: Mutex<()>,
}

impl SlotShared {
    fn state(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state().generation == generation
    }
}

/// One display position that shows at most one image at a time.
///
/// Every `load` supersedes the previous one. A superseded or cancelled fetch
/// may still finish on the network, but its callback is never run once the
/// superseding `load` or `cancel` has returned. If a callback is already
/// running on another thread, `load` and `cancel` wait for it to finish.
/// Dropping the slot cancels its fetch.
pub struct ImageSlot {
    client: PhotoClient,
    scale: f32,
    shared: Arc<SlotShared>,
}

impl ImageSlot {
    pub fn new(client: PhotoClient, scale: f32) -> Self {
        Self {
            client,
            scale,
            shared: Arc::new(SlotShared::default()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state().in_flight
    }

    /// Moves the slot to a new generation and waits out any callback running
    /// on another thread. Returns the new generation.
    fn supersede(&self, start: bool) -> u64 {
        let (generation, wait) = {
            let mut state = self.shared.state();
            if state.in_flight || start {
                if state.in_flight {
                    tracing::debug!(generation = state.generation, "superseding image fetch");
                }
                state.generation += 1;
            }
            state.in_flight = start;
            let me = thread::current().id();
            (state.generation, state.delivering.is_some_and(|t| t != me))
        };
        if wait {
            drop(self.shared.delivery.lock().unwrap_or_else(PoisonError::into_inner));
        }
        generation
    }

    /// Starts fetching `url`, cancelling whatever this slot was loading.
    ///
    /// `on_complete` receives the image, or `None` if it could not be fetched
    /// or decoded. It may call back into this slot.
    pub fn load<F>(&self, url: &str, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Option<DecodedImage>) + Send + 'static,
    {
        let generation = self.supersede(true);

        let client = self.client.clone();
        let shared = Arc::clone(&self.shared);
        let scale = self.scale;
        let url = url.to_string();

        thread::spawn(move || {
            let bytes = client.image_bytes(&url);
            if !shared.is_current(generation) {
                tracing::debug!(%url, "dropping superseded image before decode");
                return;
            }
            let result = bytes.and_then(|bytes| decode(&bytes, scale));

            let _delivery = shared.delivery.lock().unwrap_or_else(PoisonError::into_inner);
            {
                let mut state = shared.state();
                if state.generation != generation {
                    tracing::debug!(%url, "dropping superseded image");
                    return;
                }
                state.in_flight = false;
                state.delivering = Some(thread::current().id());
            }

            let image = match result {
                Ok(image) => Some(image),
                Err(e @ FeedError::Decode(_)) => {
                    tracing::debug!(%url, error = %e, "image could not be decoded");
                    None
                }
                Err(e) => {
                    tracing::debug!(%url, error = %e, "image could not be fetched");
                    None
                }
            };
            on_complete(image);
            shared.state().delivering = None;
        })
    }

    /// Abandons the in-flight fetch, if any. Its callback will not run.
    pub fn cancel(&self) {
        self.supersede(false);
    }
}

impl Drop for ImageSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn decode(bytes: &[u8], scale: f32) -> Result<DecodedImage, FeedError> {
    let image = image::load_from_memory(bytes)?;
    Ok(DecodedImage { image, scale })
}
