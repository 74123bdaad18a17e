pub mod browse;
pub mod comments;
pub mod image;
pub mod info;

use std::fmt::Write;

use itertools::Itertools;
use photomania::Photo;

/// Lays photo ids out in rows of `columns`, each row prefixed with the
/// position of its first cell.
fn render_grid(photos: &[Photo], columns: usize) -> String {
    let columns = columns.max(1);
    let width = photos
        .iter()
        .map(|p| p.id.to_string().len())
        .max()
        .unwrap_or(1);
    let pos_width = photos.len().saturating_sub(1).to_string().len();

    let mut out = String::new();
    let rows = photos.iter().chunks(columns);
    for (row, cells) in rows.into_iter().enumerate() {
        let line = cells.map(|p| format!("{:>width$}", p.id)).join("  ");
        writeln!(out, "[{:>pos_width$}] {}", row * columns, line).unwrap();
    }
    out
}

fn describe(photo: &Photo) -> String {
    let mut out = String::new();
    let mut field = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            writeln!(out, "{label:<14}{value}").unwrap();
        }
    };
    field("id", Some(photo.id.to_string()));
    field("name", photo.name.clone());
    field("url", Some(photo.url.clone()));
    field("category", photo.category.map(|c| c.to_string()));
    field("rating", photo.rating.map(|r| format!("{r:.1}")));
    field("highest", photo.highest_rating.map(|r| format!("{r:.1}")));
    field("views", photo.times_viewed.map(|v| v.to_string()));
    field("votes", photo.votes_count.map(|v| v.to_string()));
    field("favorites", photo.favorites_count.map(|v| v.to_string()));
    field("comments", photo.comments_count.map(|v| v.to_string()));
    field("camera", photo.camera.clone());
    field("focal length", photo.focal_length.clone());
    field("shutter", photo.shutter_speed.clone());
    field("aperture", photo.aperture.clone());
    field("iso", photo.iso.clone());
    field("taken", photo.taken_at.clone());
    field("uploaded", photo.created_at.clone());
    if let Some(user) = &photo.user {
        field("by", user.fullname.clone().or_else(|| user.username.clone()));
    }
    field("description", photo.description.clone());
    out
}
