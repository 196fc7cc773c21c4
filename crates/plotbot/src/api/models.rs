//! Typed records at the platform boundary
//!
//! Responses are deserialized straight into these records; a response with a
//! missing required field is rejected as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Platform-assigned post identifier
pub type PostId = u64;

/// Format of `created_at` in v1.1 responses, e.g. `Wed Oct 10 20:19:24 +0000 2018`
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// The authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub screen_name: String,
}

/// Author of a mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionAuthor {
    pub screen_name: String,
}

/// A post returned by the mention search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionPost {
    pub id: PostId,
    pub text: String,
    #[serde(rename = "user")]
    pub author: MentionAuthor,
}

/// Search envelope, `{"statuses": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<MentionPost>,
}

/// Author of a timeline post
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineAuthor {
    pub name: String,
}

/// A post from a user's timeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelinePost {
    pub id: PostId,
    pub text: String,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "user")]
    pub author: TimelineAuthor,
}

/// A post we published
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostedStatus {
    pub id: PostId,
}

/// Result of a media upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaUpload {
    pub media_id_string: String,
}

/// Parse a v1.1 `created_at` timestamp
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT).map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_created_at() {
        let parsed = parse_created_at("Wed Oct 10 20:19:24 +0000 2018").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap());

        let offset = parse_created_at("Wed Oct 10 22:19:24 +0200 2018").unwrap();
        assert_eq!(offset, parsed);

        assert!(parse_created_at("2018-10-10T20:19:24Z").is_err());
    }

    #[test]
    fn test_search_response() {
        let body = json!({
            "statuses": [
                {
                    "id": 1_050_118_621_198_921_728_u64,
                    "text": "@bot analyze: @x",
                    "user": {"screen_name": "alice", "name": "Alice"}
                },
            ],
            "search_metadata": {"count": 15}
        });
        let parsed: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.statuses.len(), 1);
        assert_eq!(parsed.statuses[0].id, 1_050_118_621_198_921_728);
        assert_eq!(parsed.statuses[0].author.screen_name, "alice");
    }

    #[test]
    fn test_timeline_post() {
        let body = json!({
            "id": 42,
            "text": "What a lovely day",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "user": {"name": "Dalai Lama", "screen_name": "DalaiLama"}
        });
        let post: TimelinePost = serde_json::from_value(body).unwrap();
        assert_eq!(post.author.name, "Dalai Lama");
        assert_eq!(post.created_at, Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let body = json!({"id": 42, "text": "no author or date"});
        assert!(serde_json::from_value::<TimelinePost>(body).is_err());

        let body = json!({"statuses": [{"id": 1, "user": {"screen_name": "a"}}]});
        assert!(serde_json::from_value::<SearchResponse>(body).is_err());
    }
}
