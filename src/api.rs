use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::FeedError;
use crate::photo::{Comment, ImageSize, Photo, comment};
use crate::router::Route;

/// Blocking client for the photo-sharing API.
#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: reqwest::blocking::Client,
    config: ApiConfig,
}

impl PhotoClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let http = crate::http::http_client(config.timeout)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self.http.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }

    fn get_json(&self, route: Route) -> Result<Value, FeedError> {
        let url = route.url(&self.config);
        tracing::debug!(%url, "requesting");
        let bytes = self.get_bytes(url.as_str())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Raw listing records of one page of popular photos.
    pub fn popular_page(&self, page: u32) -> Result<Vec<Value>, FeedError> {
        let mut response = self.get_json(Route::PopularPhotos(page))?;
        match response.get_mut("photos").map(Value::take) {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(FeedError::Decode(format!(
                "listing page {page} has no `photos` array"
            ))),
        }
    }

    pub fn photo_info(&self, id: u64, size: ImageSize) -> Result<Photo, FeedError> {
        let response = self.get_json(Route::PhotoInfo(id, size))?;
        Photo::from_detail(&response)
    }

    pub fn comments(&self, id: u64, page: u32) -> Result<Vec<Comment>, FeedError> {
        let response = self.get_json(Route::Comments(id, page))?;
        comment::parse_comments(&response).ok_or_else(|| {
            FeedError::Decode(format!("comments for photo {id} have no `comments` array"))
        })
    }

    /// Image bytes at `url`. An empty body is a decode failure, not a transport one.
    pub fn image_bytes(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let bytes = self.get_bytes(url)?;
        if bytes.is_empty() {
            return Err(FeedError::Decode("empty image payload".into()));
        }
        Ok(bytes)
    }
}
