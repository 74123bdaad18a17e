use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use orderset::OrderedSet;
use serde_json::Value;

use crate::api::PhotoClient;
use crate::error::FeedError;
use crate::photo::{ImageSize, Photo, Rejection};

/// Receives the outcome of every page request. Called from the worker thread
/// that ran the request; hop to the display context yourself if needed.
pub trait FeedObserver: Send + Sync {
    fn page_merged(&self, merge: &PageMerge);
    fn page_failed(&self, page: u32, error: &FeedError);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMerge {
    pub page: u32,
    /// Positions of the photos this page added.
    pub inserted: Range<usize>,
    /// True when the collection was cleared before this page was merged.
    pub refreshed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
}

struct PagerState {
    phase: Phase,
    current_page: u32,
    photos: OrderedSet<Photo>,
}

/// Merges listing records into `photos` and returns the positions added.
///
/// Malformed and flagged records are skipped, as are ids already present.
pub fn merge_records(photos: &mut OrderedSet<Photo>, records: &[Value]) -> Range<usize> {
    let mut malformed = 0usize;
    let mut flagged = 0usize;
    let accepted: Vec<Photo> = records
        .iter()
        .filter_map(|record| match Photo::from_listing_record(record) {
            Ok(photo) => Some(photo),
            Err(Rejection::Malformed) => {
                malformed += 1;
                None
            }
            Err(Rejection::Nsfw) => {
                flagged += 1;
                None
            }
        })
        .collect();
    let candidates = accepted.len();
    let inserted = photos.extend(accepted);
    tracing::debug!(
        malformed,
        flagged,
        duplicates = candidates - inserted.len(),
        added = inserted.len(),
        "merged listing records"
    );
    inserted
}

/// Pages through the popular listing, keeping every photo seen so far in
/// first-seen order with no repeated ids.
///
/// At most one page request is in flight at a time. The pager is `Idle` until
/// a request is dispatched and returns to `Idle` only once the response has
/// been merged or rejected.
pub struct FeedPager {
    client: PhotoClient,
    state: Arc<Mutex<PagerState>>,
    observer: Arc<dyn FeedObserver>,
}

impl FeedPager {
    pub fn new(client: PhotoClient, observer: Arc<dyn FeedObserver>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(PagerState {
                phase: Phase::Idle,
                current_page: 1,
                photos: OrderedSet::new(),
            })),
            observer,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests the next page unless one is already loading.
    ///
    /// Returns the worker handle, or `None` when the call was a no-op.
    pub fn request_next_page(&self) -> Option<JoinHandle<()>> {
        let page = {
            let mut state = self.lock();
            if state.phase == Phase::Loading {
                tracing::debug!("page request ignored, already loading");
                return None;
            }
            state.phase = Phase::Loading;
            state.current_page
        };
        Some(self.dispatch(page, false))
    }

    /// Starts over from page 1 with an empty collection. Ignored while a page
    /// is loading.
    pub fn request_refresh(&self) -> Option<JoinHandle<()>> {
        {
            let mut state = self.lock();
            if state.phase == Phase::Loading {
                tracing::debug!("refresh ignored, already loading");
                return None;
            }
            state.phase = Phase::Loading;
            state.current_page = 1;
            state.photos.clear();
        }
        Some(self.dispatch(1, true))
    }

    fn dispatch(&self, page: u32, refreshed: bool) -> JoinHandle<()> {
        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let observer = Arc::clone(&self.observer);

        std::thread::spawn(move || {
            let fetched = client.popular_page(page);

            let outcome = {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                let outcome = fetched.map(|records| {
                    let inserted = merge_records(&mut state.photos, &records);
                    state.current_page += 1;
                    PageMerge {
                        page,
                        inserted,
                        refreshed,
                    }
                });
                state.phase = Phase::Idle;
                outcome
            };

            match outcome {
                Ok(merge) => {
                    tracing::info!(page, added = merge.inserted.len(), "page merged");
                    observer.page_merged(&merge);
                }
                Err(e) => {
                    tracing::warn!(page, error = %e, "page request failed");
                    observer.page_failed(page, &e);
                }
            }
        })
    }

    /// Fetches the detail record for a known photo and swaps it in at the same
    /// position. Returns that position, or `None` if the id is not in the feed.
    pub fn enrich(&self, id: u64, size: ImageSize) -> Result<Option<usize>, FeedError> {
        let detailed = self.client.photo_info(id, size)?;
        if detailed.id != id {
            return Err(FeedError::Decode(format!(
                "detail requested for photo {id} describes photo {}",
                detailed.id
            )));
        }
        let mut state = self.lock();
        if !state.photos.contains(&id) {
            return Ok(None);
        }
        Ok(Some(state.photos.upsert(detailed)))
    }

    pub fn current_page(&self) -> u32 {
        self.lock().current_page
    }

    pub fn is_loading(&self) -> bool {
        self.lock().phase == Phase::Loading
    }

    pub fn len(&self) -> usize {
        self.lock().photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().photos.is_empty()
    }

    pub fn photo_at(&self, position: usize) -> Option<Photo> {
        self.lock().photos.get(position).cloned()
    }

    pub fn photo(&self, id: u64) -> Option<Photo> {
        self.lock().photos.get_by_key(&id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Photo> {
        self.lock().photos.items()
    }
}
