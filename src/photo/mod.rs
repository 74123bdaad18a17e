pub mod category;
pub mod comment;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::FeedError;

pub use category::Category;
pub use comment::Comment;

/// Image size tiers understood by the detail endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageSize {
    Tiny = 1,
    Small = 2,
    Medium = 3,
    Large = 4,
    XLarge = 5,
}

impl ImageSize {
    pub fn tier(self) -> u8 {
        self as u8
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tiny" | "1" => Ok(ImageSize::Tiny),
            "small" | "2" => Ok(ImageSize::Small),
            "medium" | "3" => Ok(ImageSize::Medium),
            "large" | "4" => Ok(ImageSize::Large),
            "xlarge" | "5" => Ok(ImageSize::XLarge),
            other => Err(format!(
                "unknown image size: {other}. Use: tiny, small, medium, large, xlarge"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Uploader {
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub userpic_url: Option<String>,
}

/// One photo in the feed. Two photos are equal when their ids are equal,
/// whatever else differs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Photo {
    pub id: u64,
    pub url: String,
    pub name: Option<String>,
    pub favorites_count: Option<i64>,
    pub votes_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub highest_rating: Option<f64>,
    pub rating: Option<f64>,
    pub times_viewed: Option<i64>,
    pub camera: Option<String>,
    pub focal_length: Option<String>,
    pub shutter_speed: Option<String>,
    pub aperture: Option<String>,
    pub iso: Option<String>,
    pub category: Option<Category>,
    pub taken_at: Option<String>,
    pub created_at: Option<String>,
    pub description: Option<String>,
    pub user: Option<Uploader>,
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Photo {}

impl Hash for Photo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl orderset::Keyed for Photo {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", self.id, name),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Why a listing record did not become a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Malformed,
    Nsfw,
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer)?.as_str().map(str::to_string)
}

fn int_at(value: &Value, pointer: &str) -> Option<i64> {
    value.pointer(pointer)?.as_i64()
}

fn float_at(value: &Value, pointer: &str) -> Option<f64> {
    value.pointer(pointer)?.as_f64()
}

impl Photo {
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Promotes one listing record to a minimal photo.
    ///
    /// `nsfw`, `id` and `image_url` must be present with the right types;
    /// flagged records are rejected as well.
    pub fn from_listing_record(record: &Value) -> Result<Self, Rejection> {
        let nsfw = record.get("nsfw").and_then(Value::as_bool);
        let id = record.get("id").and_then(Value::as_u64);
        let url = record.get("image_url").and_then(Value::as_str);
        match (nsfw, id, url) {
            (Some(false), Some(id), Some(url)) => Ok(Self::new(id, url)),
            (Some(true), Some(_), Some(_)) => Err(Rejection::Nsfw),
            _ => Err(Rejection::Malformed),
        }
    }

    /// Builds a fully populated photo from a detail response (`{"photo": {...}}`).
    pub fn from_detail(response: &Value) -> Result<Self, FeedError> {
        let photo = response
            .get("photo")
            .ok_or_else(|| FeedError::Decode("detail response has no `photo` object".into()))?;
        let id = photo
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| FeedError::Decode("photo detail has no integer `id`".into()))?;
        let url = photo
            .get("image_url")
            .and_then(Value::as_str)
            .ok_or_else(|| FeedError::Decode("photo detail has no `image_url`".into()))?;

        let user = photo.get("user").filter(|u| u.is_object()).map(|u| Uploader {
            username: string_at(u, "/username"),
            fullname: string_at(u, "/fullname"),
            userpic_url: string_at(u, "/userpic_url"),
        });

        Ok(Self {
            id,
            url: url.to_string(),
            name: string_at(photo, "/name"),
            favorites_count: int_at(photo, "/favorites_count"),
            votes_count: int_at(photo, "/votes_count"),
            comments_count: int_at(photo, "/comments_count"),
            highest_rating: float_at(photo, "/highest_rating"),
            rating: float_at(photo, "/rating"),
            times_viewed: int_at(photo, "/times_viewed"),
            camera: string_at(photo, "/camera"),
            focal_length: string_at(photo, "/focal_length"),
            shutter_speed: string_at(photo, "/shutter_speed"),
            aperture: string_at(photo, "/aperture"),
            iso: string_at(photo, "/iso"),
            category: int_at(photo, "/category").and_then(|c| Category::try_from(c).ok()),
            taken_at: string_at(photo, "/taken_at"),
            created_at: string_at(photo, "/created_at"),
            description: string_at(photo, "/description"),
            user,
        })
    }
}
