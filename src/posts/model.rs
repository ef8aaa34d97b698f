//! Post and comment records, plus the request payloads that build them.
//!
//! Payloads are parsed from raw JSON objects rather than derived structs
//! because presence is decided by truthiness, not by key existence: `""`,
//! `0`, `false` and `null` count as missing, while `[]` and `{}` do not.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::PostError;

/// A top-level content record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub comments: Vec<Comment>,
}

/// An unkeyed sub-record, identified only by its position in a post.
///
/// Keys other than `author` and `content` are rejected, not dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Comment {
    pub author: String,
    pub content: String,
}

/// Fields of a post before an id is assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub comments: Vec<Comment>,
}

impl NewPost {
    /// Every field must be truthy. Nothing is typed until all five are
    /// known to be present, so a missing field always wins over a badly
    /// typed one.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, PostError> {
        let required = ["title", "image", "description", "category", "comments"];
        if !required.iter().all(|f| is_truthy(body.get(*f))) {
            return Err(PostError::MissingField);
        }
        Ok(Self {
            title: field(body, "title")?,
            image: field(body, "image")?,
            description: field(body, "description")?,
            category: field(body, "category")?,
            comments: field(body, "comments")?,
        })
    }

    pub fn into_post(self, id: String) -> Post {
        Post {
            id,
            title: self.title,
            image: self.image,
            description: self.description,
            category: self.category,
            comments: self.comments,
        }
    }
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub comments: Option<Vec<Comment>>,
}

impl PostPatch {
    /// Falsy fields are treated as omitted, so a patch can never clear a
    /// field to `""` or an empty value.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, PostError> {
        Ok(Self {
            title: optional_field(body, "title")?,
            image: optional_field(body, "image")?,
            description: optional_field(body, "description")?,
            category: optional_field(body, "category")?,
            comments: optional_field(body, "comments")?,
        })
    }

    /// Returns an updated copy of `post`. The id is never patched.
    pub fn apply(self, post: &Post) -> Post {
        let mut updated = post.clone();
        if let Some(title) = self.title {
            updated.title = title;
        }
        if let Some(image) = self.image {
            updated.image = image;
        }
        if let Some(description) = self.description {
            updated.description = description;
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(comments) = self.comments {
            updated.comments = comments;
        }
        updated
    }
}

/// Body of a comment-append request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewComment(pub Comment);

impl NewComment {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, PostError> {
        if !is_truthy(body.get("author")) || !is_truthy(body.get("content")) {
            return Err(PostError::MissingField);
        }
        Ok(Self(Comment {
            author: field(body, "author")?,
            content: field(body, "content")?,
        }))
    }
}

/// Parses a request body into a JSON object.
///
/// An empty body, or JSON that is not an object, reads as `{}` so that every
/// field is simply missing. Bytes that are not JSON at all are rejected.
pub fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, PostError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(PostError::InvalidBody(e)),
    }
}

/// Loose truthiness over JSON values. A missing key is falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn field<T: DeserializeOwned>(body: &Map<String, Value>, name: &'static str) -> Result<T, PostError> {
    let value = body.get(name).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|source| PostError::InvalidField { field: name, source })
}

fn optional_field<T: DeserializeOwned>(
    body: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<T>, PostError> {
    if is_truthy(body.get(name)) {
        field(body, name).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn truthiness_matches_loose_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(Some(&falsy)), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(Some(&truthy)), "{truthy} should be truthy");
        }
        assert!(!is_truthy(None));
    }

    #[test]
    fn new_post_accepts_empty_comments() {
        let body = object(json!({
            "title": "A", "image": "i", "description": "d", "category": "c", "comments": [],
        }));
        let post = NewPost::from_body(&body).unwrap().into_post("1".into());
        assert_eq!(post.title, "A");
        assert!(post.comments.is_empty());
    }

    #[test]
    fn new_post_requires_every_field() {
        let body = object(json!({ "title": "A" }));
        assert!(matches!(NewPost::from_body(&body), Err(PostError::MissingField)));

        let body = object(json!({
            "title": "", "image": "i", "description": "d", "category": "c", "comments": [],
        }));
        assert!(matches!(NewPost::from_body(&body), Err(PostError::MissingField)));
    }

    #[test]
    fn new_post_rejects_wrong_types() {
        let body = object(json!({
            "title": 5, "image": "i", "description": "d", "category": "c", "comments": [],
        }));
        assert!(matches!(
            NewPost::from_body(&body),
            Err(PostError::InvalidField { field: "title", .. })
        ));

        let body = object(json!({
            "title": "A", "image": "i", "description": "d", "category": "c",
            "comments": [{ "author": "X" }],
        }));
        assert!(matches!(
            NewPost::from_body(&body),
            Err(PostError::InvalidField { field: "comments", .. })
        ));
    }

    #[test]
    fn comments_with_extra_keys_are_rejected() {
        let body = object(json!({
            "title": "A", "image": "i", "description": "d", "category": "c",
            "comments": [{ "author": "X", "content": "Y", "likes": 3 }],
        }));
        assert!(matches!(
            NewPost::from_body(&body),
            Err(PostError::InvalidField { field: "comments", .. })
        ));

        let patch = PostPatch::from_body(&object(json!({
            "comments": [{ "author": "X", "content": "Y", "id": 1 }],
        })));
        assert!(matches!(patch, Err(PostError::InvalidField { field: "comments", .. })));
    }

    #[test]
    fn patch_ignores_falsy_fields() {
        let post = Post {
            id: "1".into(),
            title: "Old".into(),
            image: "i".into(),
            description: "d".into(),
            category: "c".into(),
            comments: vec![Comment { author: "X".into(), content: "Y".into() }],
        };
        let patch = PostPatch::from_body(&object(json!({
            "title": "New", "image": "", "category": null, "comments": false,
        })))
        .unwrap();

        let updated = patch.apply(&post);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.image, "i");
        assert_eq!(updated.category, "c");
        assert_eq!(updated.comments, post.comments);
        assert_eq!(updated.id, post.id);
    }

    #[test]
    fn comment_requires_author_and_content() {
        let ok = NewComment::from_body(&object(json!({ "author": "X", "content": "Y" }))).unwrap();
        assert_eq!(ok.0, Comment { author: "X".into(), content: "Y".into() });

        let missing = NewComment::from_body(&object(json!({ "author": "X", "content": "" })));
        assert!(matches!(missing, Err(PostError::MissingField)));
    }

    #[test]
    fn body_parsing() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b"[1, 2]").unwrap().is_empty());
        assert_eq!(parse_body(br#"{"a":1}"#).unwrap().len(), 1);
        assert!(matches!(parse_body(b"{oops"), Err(PostError::InvalidBody(_))));
    }
}
