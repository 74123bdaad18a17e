use std::io::Cursor;
use std::time::Duration;

use assert_cmd::Command;
use httpmock::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    server: MockServer,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            server: MockServer::start(),
        }
    }

    fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        #[allow(deprecated)]
        Command::cargo_bin("photomania")
            .unwrap()
            .args(args)
            .env("PHOTOMANIA_API_URL", self.server.url("/v1"))
            .env("PHOTOMANIA_CONSUMER_KEY", "test-key")
            .env_remove("PHOTOMANIA_LOG")
            .assert()
    }

    fn mock_page(&self, page: u32, body: Value) {
        self.server.mock(|when, then| {
            when.method(GET)
                .path("/v1/photos")
                .query_param("consumer_key", "test-key")
                .query_param("page", page.to_string())
                .query_param("feature", "popular");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        });
    }

    fn mock_detail(&self, id: u64, body: Value) {
        self.server.mock(|when, then| {
            when.method(GET).path(format!("/v1/photos/{id}"));
            then.status(200).json_body(body);
        });
    }
}

fn listing(ids: impl IntoIterator<Item = u64>) -> Value {
    let photos: Vec<Value> = ids
        .into_iter()
        .map(|id| json!({"id": id, "nsfw": false, "image_url": format!("https://img/{id}.jpg")}))
        .collect();
    json!({ "photos": photos })
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stderr.clone()).unwrap()
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[test]
fn test_browse_prints_grid() {
    let ctx = TestContext::new();
    ctx.mock_page(1, listing([11, 12, 13, 14]));

    let output = ctx.run(&["browse"]).success();

    assert_eq!(stdout_of(&output), "[0] 11  12  13\n[3] 14\n");
    assert!(stderr_of(&output).contains("page 1: 4 new photos at 0..4"));
}

#[test]
fn test_browse_skips_duplicates_across_pages() {
    let ctx = TestContext::new();
    ctx.mock_page(1, listing(1..=5));
    ctx.mock_page(2, listing(4..=8));

    let output = ctx.run(&["browse", "--pages", "2", "--columns", "4"]).success();

    let stderr = stderr_of(&output);
    assert!(stderr.contains("page 1: 5 new photos at 0..5"), "got: {}", stderr);
    assert!(stderr.contains("page 2: 3 new photos at 5..8"), "got: {}", stderr);
    assert_eq!(stdout_of(&output), "[0] 1  2  3  4\n[4] 5  6  7  8\n");
}

#[test]
fn test_browse_filters_flagged_and_malformed_records() {
    let ctx = TestContext::new();
    ctx.mock_page(
        1,
        json!({"photos": [
            {"id": 1, "nsfw": false, "image_url": "https://img/1.jpg"},
            {"id": 2, "nsfw": true, "image_url": "https://img/2.jpg"},
            {"id": 3, "nsfw": false}
        ]}),
    );

    let output = ctx.run(&["browse"]).success();
    assert_eq!(stdout_of(&output), "[0] 1\n");
}

#[test]
fn test_browse_stops_at_failed_page() {
    let ctx = TestContext::new();
    ctx.mock_page(1, listing([1, 2]));
    ctx.server.mock(|when, then| {
        when.method(GET).path("/v1/photos").query_param("page", "2");
        then.status(500).body("boom");
    });

    let output = ctx.run(&["browse", "--pages", "3"]).success();

    let stderr = stderr_of(&output);
    assert!(stderr.contains("Error fetching page 2"), "got: {}", stderr);
    assert!(stderr.contains("500"), "error should mention the status, got: {}", stderr);
    assert!(!stderr.contains("page 3"));
    assert_eq!(stdout_of(&output), "[0] 1  2\n");
}

#[test]
fn test_browse_with_details() {
    let ctx = TestContext::new();
    ctx.mock_page(1, listing([1, 2]));
    ctx.mock_detail(
        1,
        json!({"photo": {"id": 1, "image_url": "https://img/1-large.jpg", "name": "Dunes", "category": 8}}),
    );
    ctx.server.mock(|when, then| {
        when.method(GET).path("/v1/photos/2");
        then.status(404);
    });

    let output = ctx.run(&["browse", "--details"]).success();

    let stdout = stdout_of(&output);
    assert!(stdout.contains("name          Dunes"));
    assert!(stdout.contains("category      Landscapes"));
    assert!(stdout.contains("url           https://img/1-large.jpg"));
    assert!(stdout.contains("url           https://img/2.jpg"));
    assert!(stderr_of(&output).contains("Error fetching details for 2"));
}

#[test]
fn test_info_text_and_json() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(GET)
            .path("/v1/photos/42")
            .query_param("consumer_key", "test-key")
            .query_param("image_size", "2");
        then.status(200).json_body(json!({"photo": {
            "id": 42,
            "image_url": "https://img/42.jpg",
            "camera": "X100",
            "iso": "400",
            "user": {"username": "ada", "fullname": "Ada L"}
        }}));
    });

    let text = ctx.run(&["info", "42", "--size", "small"]).success();
    let stdout = stdout_of(&text);
    assert!(stdout.starts_with("id            42\n"));
    assert!(stdout.contains("camera        X100\n"));
    assert!(stdout.contains("by            Ada L\n"));

    let json_out = ctx.run(&["info", "42", "--size", "small", "--json"]).success();
    let value: Value = serde_json::from_str(&stdout_of(&json_out)).unwrap();
    assert_eq!(value["id"], 42);
    assert_eq!(value["iso"], "400");
    assert_eq!(value["user"]["username"], "ada");
}

#[test]
fn test_info_rejects_unknown_size() {
    let ctx = TestContext::new();
    ctx.run(&["info", "42", "--size", "huge"]).failure();
}

#[test]
fn test_comments_lists_complete_comments() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(GET)
            .path("/v1/photos/7/comments")
            .query_param("comments", "1")
            .query_param("comments_page", "2");
        then.status(200).json_body(json!({"comments": [
            {"body": "Great colours", "user": {"fullname": "Ada L", "userpic_url": "a"}},
            {"body": "orphan"},
            {"body": "Sharp!", "user": {"fullname": "Bo", "userpic_url": "b"}}
        ]}));
    });

    let output = ctx.run(&["comments", "7", "--page", "2"]).success();
    assert_eq!(stdout_of(&output), "Ada L: Great colours\nBo: Sharp!\n");
}

#[test]
fn test_comments_empty_page_fails() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(GET).path("/v1/photos/7/comments");
        then.status(200).json_body(json!({"comments": []}));
    });

    let output = ctx.run(&["comments", "7"]).failure();
    assert!(stderr_of(&output).contains("No comments on page 1"));
}

#[test]
fn test_image_decodes_and_saves() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(GET).path("/img/a.png");
        then.status(200)
            .header("Content-Type", "image/png")
            .delay(Duration::from_millis(10))
            .body(png(4, 2));
    });
    let target = ctx.dir.path().join("a.png");

    let output = ctx
        .run(&[
            "image",
            &ctx.server.url("/img/a.png"),
            "--scale",
            "2",
            "--output",
            target.to_str().unwrap(),
        ])
        .success();

    assert_eq!(stdout_of(&output), "4x2 px (2x1 pt @2x)\n");
    let saved = image::open(&target).unwrap();
    assert_eq!((saved.width(), saved.height()), (4, 2));
}

#[test]
fn test_image_failure_reports_url() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(GET).path("/img/gone.png");
        then.status(404);
    });

    let url = ctx.server.url("/img/gone.png");
    let output = ctx.run(&["image", &url]).failure();
    assert!(stderr_of(&output).contains("Could not load image"));
}

#[test]
fn test_missing_consumer_key_fails() {
    let ctx = TestContext::new();
    #[allow(deprecated)]
    let output = Command::cargo_bin("photomania")
        .unwrap()
        .args(["browse"])
        .env("PHOTOMANIA_API_URL", ctx.server.url("/v1"))
        .env_remove("PHOTOMANIA_CONSUMER_KEY")
        .assert()
        .failure();
    assert!(stderr_of(&output).contains("PHOTOMANIA_CONSUMER_KEY is not set"));
}
