use url::Url;

use crate::config::ApiConfig;
use crate::photo::ImageSize;

pub const PAGE_SIZE: u32 = 50;

/// The requests the client knows how to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PopularPhotos(u32),
    PhotoInfo(u64, ImageSize),
    Comments(u64, u32),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::PopularPhotos(_) => "/photos".to_string(),
            Route::PhotoInfo(id, _) => format!("/photos/{id}"),
            Route::Comments(id, _) => format!("/photos/{id}/comments"),
        }
    }

    /// Query parameters in the order they are sent.
    pub fn params(&self, consumer_key: &str) -> Vec<(&'static str, String)> {
        let key = ("consumer_key", consumer_key.to_string());
        match *self {
            Route::PopularPhotos(page) => vec![
                key,
                ("page", page.to_string()),
                ("feature", "popular".to_string()),
                ("rpp", PAGE_SIZE.to_string()),
                ("include_store", "store_download".to_string()),
                ("include_states", "votes".to_string()),
            ],
            Route::PhotoInfo(_, size) => vec![key, ("image_size", size.tier().to_string())],
            Route::Comments(_, page) => vec![
                key,
                ("comments", "1".to_string()),
                ("comments_page", page.to_string()),
            ],
        }
    }

    pub fn url(&self, config: &ApiConfig) -> Url {
        let mut url = config.base_url.clone();
        let path = format!("{}{}", config.base_url.path().trim_end_matches('/'), self.path());
        url.set_path(&path);
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(self.params(&config.consumer_key));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig::new("https://api.500px.com/v1", "KEY").unwrap()
    }

    #[test]
    fn test_popular_photos_url() {
        let url = Route::PopularPhotos(3).url(&config());
        assert_eq!(
            url.as_str(),
            "https://api.500px.com/v1/photos?consumer_key=KEY&page=3&feature=popular&rpp=50\
             &include_store=store_download&include_states=votes"
        );
    }

    #[test]
    fn test_photo_info_url() {
        let url = Route::PhotoInfo(10000, ImageSize::Large).url(&config());
        assert_eq!(
            url.as_str(),
            "https://api.500px.com/v1/photos/10000?consumer_key=KEY&image_size=4"
        );
    }

    #[test]
    fn test_comments_url() {
        let url = Route::Comments(77, 2).url(&config());
        assert_eq!(
            url.as_str(),
            "https://api.500px.com/v1/photos/77/comments?consumer_key=KEY&comments=1&comments_page=2"
        );
    }

    #[test]
    fn test_base_with_trailing_slash_and_no_path() {
        let slashed = ApiConfig::new("http://127.0.0.1:9000/v1/", "k").unwrap();
        assert_eq!(Route::PopularPhotos(1).url(&slashed).path(), "/v1/photos");

        let bare = ApiConfig::new("http://127.0.0.1:9000", "k").unwrap();
        assert_eq!(Route::Comments(5, 1).url(&bare).path(), "/photos/5/comments");
    }

    #[test]
    fn test_key_is_encoded() {
        let config = ApiConfig::new("https://api.example.com", "a b&c").unwrap();
        let url = Route::PhotoInfo(1, ImageSize::Tiny).url(&config);
        assert_eq!(url.query(), Some("consumer_key=a+b%26c&image_size=1"));
    }

    #[test]
    fn test_same_route_same_request() {
        let route = Route::PopularPhotos(9);
        assert_eq!(route.url(&config()), route.url(&config()));
    }
}
