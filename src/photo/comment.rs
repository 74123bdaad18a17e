use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub user_fullname: String,
    pub user_picture_url: String,
    pub body: String,
}

impl Comment {
    /// Builds a comment from one server record. Returns `None` unless
    /// `user.fullname`, `user.userpic_url` and `body` are all strings.
    pub fn from_json(record: &Value) -> Option<Self> {
        Some(Self {
            user_fullname: record.pointer("/user/fullname")?.as_str()?.to_string(),
            user_picture_url: record.pointer("/user/userpic_url")?.as_str()?.to_string(),
            body: record.get("body")?.as_str()?.to_string(),
        })
    }
}

/// Extracts the comments of one page, dropping incomplete records.
pub fn parse_comments(response: &Value) -> Option<Vec<Comment>> {
    let records = response.get("comments")?.as_array()?;
    let comments: Vec<Comment> = records.iter().filter_map(Comment::from_json).collect();
    if comments.len() < records.len() {
        tracing::debug!(
            dropped = records.len() - comments.len(),
            "dropped incomplete comments"
        );
    }
    Some(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_complete() {
        let record = json!({
            "body": "Lovely light",
            "user": {"fullname": "Ada L", "userpic_url": "https://pics/ada.jpg"}
        });
        assert_eq!(
            Comment::from_json(&record),
            Some(Comment {
                user_fullname: "Ada L".to_string(),
                user_picture_url: "https://pics/ada.jpg".to_string(),
                body: "Lovely light".to_string(),
            })
        );
    }

    #[test]
    fn test_from_json_requires_every_field() {
        assert!(Comment::from_json(&json!({"body": "x", "user": {"fullname": "A"}})).is_none());
        assert!(Comment::from_json(&json!({"user": {"fullname": "A", "userpic_url": "u"}})).is_none());
        assert!(Comment::from_json(&json!({"body": 3, "user": {"fullname": "A", "userpic_url": "u"}})).is_none());
    }

    #[test]
    fn test_parse_comments_drops_incomplete() {
        let response = json!({"comments": [
            {"body": "one", "user": {"fullname": "A", "userpic_url": "a"}},
            {"body": "two"},
            {"body": "three", "user": {"fullname": "C", "userpic_url": "c"}}
        ]});
        let bodies: Vec<String> = parse_comments(&response)
            .unwrap()
            .into_iter()
            .map(|c| c.body)
            .collect();
        assert_eq!(bodies, vec!["one", "three"]);
    }

    #[test]
    fn test_parse_comments_without_array() {
        assert!(parse_comments(&json!({"photo": {}})).is_none());
        assert_eq!(parse_comments(&json!({"comments": []})), Some(vec![]));
    }
}
