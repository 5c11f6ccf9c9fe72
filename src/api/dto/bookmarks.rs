/*
 * Responsibility
 * - Bookmarks の request/response DTO
 * - validate() で形式チェックし、repo に渡す型 (NewBookmark / BookmarkPatch) へ変換する
 * - response 化の時点で sanitize する (title は全エスケープ、description は危険な要素のみ除去)
 *
 * create の検査順は固定: 必須 (title → url → rating) → rating の範囲 → url の形式
 * 最初に失敗したルールのメッセージだけを返す
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::repos::{BookmarkPatch, BookmarkRow, NewBookmark};
use crate::services::sanitize;

pub const RATING_OUT_OF_RANGE: &str = "'rating' must be a number between 0 and 5";
pub const URL_INVALID: &str = "'url' must be a valid URL";
pub const NO_UPDATABLE_FIELDS: &str =
    "Request body must contain either 'title', 'url', 'description' or 'rating'";

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    // 数値以外 ("invalid" など) も受けてから 400 にしたいので Value で受ける
    pub rating: Option<Value>,
}

impl CreateBookmarkRequest {
    pub fn validate(self) -> Result<NewBookmark, &'static str> {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .ok_or("'title' is required")?;
        let url = self
            .url
            .filter(|u| !u.is_empty())
            .ok_or("'url' is required")?;
        // title / url と同じく falsy (null, false, 0, "") は未指定扱い
        let rating = self
            .rating
            .filter(|r| !is_falsy(r))
            .ok_or("'rating' is required")?;

        let rating = parse_rating(&rating).ok_or(RATING_OUT_OF_RANGE)?;

        if !is_web_url(&url) {
            return Err(URL_INVALID);
        }

        Ok(NewBookmark {
            title,
            url,
            description: self.description,
            rating,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Value>,
}

impl UpdateBookmarkRequest {
    pub fn validate(self) -> Result<BookmarkPatch, &'static str> {
        if let Some(title) = &self.title
            && title.is_empty()
        {
            return Err("'title' cannot be empty");
        }

        let rating = match &self.rating {
            Some(v) => Some(parse_rating(v).ok_or(RATING_OUT_OF_RANGE)?),
            None => None,
        };

        if let Some(url) = &self.url
            && !is_web_url(url)
        {
            return Err(URL_INVALID);
        }

        let patch = BookmarkPatch {
            title: self.title,
            url: self.url,
            description: self.description,
            rating,
        };
        if patch.is_empty() {
            return Err(NO_UPDATABLE_FIELDS);
        }

        Ok(patch)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// 0..=5 の整数のみ受け付ける。3.0 のように小数部が 0 の数値も整数とみなす
fn parse_rating(value: &Value) -> Option<i16> {
    let rating = match value.as_i64() {
        Some(r) => r,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 {
                return None;
            }
            f as i64
        }
    };

    (0..=5).contains(&rating).then_some(rating as i16)
}

/// scheme が http/https で host を持つ絶対 URL
fn is_web_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i16,
}

impl From<BookmarkRow> for BookmarkResponse {
    fn from(row: BookmarkRow) -> Self {
        Self {
            id: row.id,
            title: sanitize::escape_html(&row.title),
            url: row.url,
            description: row.description.as_deref().map(sanitize::clean_html),
            rating: row.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create(body: Value) -> Result<NewBookmark, &'static str> {
        serde_json::from_value::<CreateBookmarkRequest>(body)
            .unwrap()
            .validate()
    }

    fn update(body: Value) -> Result<BookmarkPatch, &'static str> {
        serde_json::from_value::<UpdateBookmarkRequest>(body)
            .unwrap()
            .validate()
    }

    #[test]
    fn create_accepts_a_complete_bookmark() {
        let new = create(json!({
            "title": "t",
            "url": "https://test.com",
            "description": "d",
            "rating": 1
        }))
        .unwrap();
        assert_eq!(
            new,
            NewBookmark {
                title: "t".into(),
                url: "https://test.com".into(),
                description: Some("d".into()),
                rating: 1,
            }
        );
    }

    #[test]
    fn create_checks_presence_in_fixed_order() {
        assert_eq!(create(json!({})), Err("'title' is required"));
        assert_eq!(
            create(json!({ "title": "", "url": "https://test.com", "rating": 1 })),
            Err("'title' is required")
        );
        assert_eq!(
            create(json!({ "title": "t", "rating": "nope" })),
            Err("'url' is required")
        );
        assert_eq!(
            create(json!({ "title": "t", "url": "https://test.com" })),
            Err("'rating' is required")
        );
    }

    #[test]
    fn create_checks_rating_before_url_format() {
        assert_eq!(
            create(json!({ "title": "t", "url": "htp://invalid-url", "rating": 9 })),
            Err(RATING_OUT_OF_RANGE)
        );
        assert_eq!(
            create(json!({ "title": "t", "url": "htp://invalid-url", "rating": 1 })),
            Err(URL_INVALID)
        );
    }

    #[test]
    fn rating_must_be_an_integer_in_range() {
        for bad in [json!("invalid"), json!(-1), json!(6), json!(2.5), json!(true)] {
            assert_eq!(
                create(json!({ "title": "t", "url": "https://test.com", "rating": bad })),
                Err(RATING_OUT_OF_RANGE)
            );
        }
        let whole = create(json!({ "title": "t", "url": "https://test.com", "rating": 3.0 }));
        assert_eq!(whole.unwrap().rating, 3);
    }

    #[test]
    fn falsy_rating_counts_as_missing() {
        for falsy in [json!(0), json!(0.0), json!(""), json!(false), Value::Null] {
            assert_eq!(
                create(json!({ "title": "t", "url": "https://test.com", "rating": falsy })),
                Err("'rating' is required")
            );
        }
    }

    #[test]
    fn update_accepts_whole_number_ratings() {
        assert_eq!(update(json!({ "rating": 4.0 })).unwrap().rating, Some(4));
        assert_eq!(update(json!({ "rating": 0 })).unwrap().rating, Some(0));
    }

    #[test]
    fn web_url_needs_http_scheme_and_host() {
        assert!(is_web_url("https://test.com"));
        assert!(is_web_url("http://www.nhl.com/scores?x=1"));
        assert!(!is_web_url("htp://invalid-url"));
        assert!(!is_web_url("ftp://files.example.com"));
        assert!(!is_web_url("mailto:someone@example.com"));
        assert!(!is_web_url("test.com"));
    }

    #[test]
    fn update_requires_at_least_one_field() {
        assert_eq!(update(json!({})), Err(NO_UPDATABLE_FIELDS));
        assert_eq!(update(json!({ "unknown": 1 })), Err(NO_UPDATABLE_FIELDS));
    }

    #[test]
    fn update_validates_supplied_fields() {
        assert_eq!(update(json!({ "rating": 7 })), Err(RATING_OUT_OF_RANGE));
        assert_eq!(update(json!({ "url": "nope" })), Err(URL_INVALID));
        assert_eq!(update(json!({ "title": "" })), Err("'title' cannot be empty"));

        let patch = update(json!({ "description": "updated description" })).unwrap();
        assert_eq!(patch.description.as_deref(), Some("updated description"));
        assert!(patch.title.is_none() && patch.rating.is_none());
    }

    #[test]
    fn response_sanitizes_title_and_description() {
        let res = BookmarkResponse::from(BookmarkRow {
            id: 911,
            title: r#"Naughty <script>alert("xss");</script>"#.into(),
            url: "https://www.hackers.com".into(),
            description: Some(r#"<img src="https://x.test/a.png" onerror="alert(1);"> <strong>ok</strong>"#.into()),
            rating: 1,
        });
        assert_eq!(res.title, r#"Naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#);
        assert_eq!(
            res.description.as_deref(),
            Some(r#"<img src="https://x.test/a.png"> <strong>ok</strong>"#)
        );
    }
}
