use std::sync::{Arc, Mutex};

use anyhow::Context;
use indicatif::ProgressBar;
use photomania::{FeedError, FeedObserver, FeedPager, ImageSize, PageMerge, PhotoClient};
use rayon::prelude::*;

use super::{describe, render_grid};

/// Keeps the outcome of the most recent page request for the command loop.
#[derive(Default)]
struct LastOutcome(Mutex<Option<Result<PageMerge, String>>>);

impl LastOutcome {
    fn take(&self) -> Option<Result<PageMerge, String>> {
        self.0.lock().ok()?.take()
    }

    fn set(&self, outcome: Result<PageMerge, String>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(outcome);
        }
    }
}

impl FeedObserver for LastOutcome {
    fn page_merged(&self, merge: &PageMerge) {
        self.set(Ok(merge.clone()));
    }

    fn page_failed(&self, _page: u32, error: &FeedError) {
        self.set(Err(error.to_string()));
    }
}

pub(crate) fn cmd_browse(
    client: PhotoClient,
    pages: u32,
    columns: usize,
    details: bool,
) -> anyhow::Result<()> {
    let outcome = Arc::new(LastOutcome::default());
    let pager = FeedPager::new(client, outcome.clone());

    for _ in 0..pages {
        let page = pager.current_page();
        pager
            .request_next_page()
            .context("a page request is already in flight")?
            .join()
            .map_err(|_| anyhow::anyhow!("page worker panicked"))?;

        match outcome.take() {
            Some(Ok(merge)) => eprintln!(
                "page {}: {} new photos at {}..{}",
                merge.page,
                merge.inserted.len(),
                merge.inserted.start,
                merge.inserted.end
            ),
            Some(Err(e)) => {
                eprintln!("Error fetching page {}: {}", page, e);
                break;
            }
            None => break,
        }
    }

    if details {
        enrich_all(&pager);
        for photo in pager.snapshot() {
            println!("{}", describe(&photo));
        }
    } else {
        print!("{}", render_grid(&pager.snapshot(), columns));
    }
    Ok(())
}

fn enrich_all(pager: &FeedPager) {
    let ids: Vec<u64> = pager.snapshot().iter().map(|p| p.id).collect();
    let pb = ProgressBar::new(ids.len() as u64);

    ids.par_iter().for_each(|&id| {
        pb.set_message(id.to_string());
        if let Err(e) = pager.enrich(id, ImageSize::Large) {
            pb.suspend(|| eprintln!("Error fetching details for {}: {}", id, e));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();
}
