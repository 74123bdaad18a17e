use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, bail};
use photomania::{ImageSlot, PhotoClient};

pub(crate) fn cmd_image(
    client: PhotoClient,
    url: &str,
    scale: f32,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    anyhow::ensure!(scale > 0.0, "Scale must be positive, got {}", scale);
    let slot = ImageSlot::new(client, scale);
    let (tx, rx) = mpsc::channel();
    slot.load(url, move |image| {
        let _ = tx.send(image);
    })
    .join()
    .map_err(|_| anyhow::anyhow!("image worker panicked"))?;

    let Some(image) = rx.recv().context("image load was cancelled")? else {
        bail!("Could not load image {}", url);
    };

    let (width, height) = image.pixel_size();
    let (points_w, points_h) = image.logical_size();
    println!("{width}x{height} px ({points_w}x{points_h} pt @{scale}x)");

    if let Some(path) = output {
        image
            .image
            .save(path)
            .with_context(|| format!("could not save image to {}", path.display()))?;
    }
    Ok(())
}
