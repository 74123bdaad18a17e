pub mod api;
pub mod config;
pub mod error;
mod http;
pub mod image_slot;
pub mod logging;
pub mod pager;
pub mod photo;
pub mod router;

pub use api::PhotoClient;
pub use config::ApiConfig;
pub use error::FeedError;
pub use image_slot::{DecodedImage, ImageSlot};
pub use pager::{FeedObserver, FeedPager, PageMerge};
pub use photo::{Category, Comment, ImageSize, Photo};
