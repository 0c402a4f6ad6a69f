use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod media;

pub use media::{CoverImage, MediaRecord, MediaTitle};

/// Which of the two selection slots an intent targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

// ============================================================================
// AniList GraphQL Types
// ============================================================================

/// Body of a GraphQL POST
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// Variables for the name search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSearchVariables<'a> {
    pub search: &'a str,
    pub page: u32,
    pub per_page: u32,
}

/// Variables for the genre search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSearchVariables<'a> {
    #[serde(rename = "genre_in")]
    pub genre_in: &'a [String],
    pub page: u32,
    pub per_page: u32,
}

/// Envelope of every GraphQL response
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<PageData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct PageData {
    #[serde(rename = "Page")]
    pub page: MediaPage,
}

#[derive(Debug, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub media: Vec<MediaRecord>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl GraphQlResponse {
    /// Media list of the first page, or a description of why there is none
    pub fn into_media(self) -> Result<Vec<MediaRecord>, String> {
        match self.data {
            Some(data) => Ok(data.page.media),
            None => {
                let messages: Vec<String> = self
                    .errors
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| e.message)
                    .collect();
                if messages.is_empty() {
                    Err("response carried no data".to_string())
                } else {
                    Err(messages.join("; "))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_display_and_serde() {
        assert_eq!(format!("{}", Side::Left), "left");
        assert_eq!(serde_json::to_string(&Side::Right).unwrap(), r#""right""#);

        let side: Side = serde_json::from_str(r#""left""#).unwrap();
        assert_eq!(side, Side::Left);
    }

    #[test]
    fn test_name_search_variables_serialization() {
        let variables = NameSearchVariables {
            search: "bebop",
            page: 1,
            per_page: 5,
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "search": "bebop", "page": 1, "perPage": 5 })
        );
    }

    #[test]
    fn test_genre_search_variables_serialization() {
        let genres = vec!["Drama".to_string(), "Sci-Fi".to_string()];
        let variables = GenreSearchVariables {
            genre_in: &genres,
            page: 1,
            per_page: 50,
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "genre_in": ["Drama", "Sci-Fi"], "page": 1, "perPage": 50 })
        );
    }

    #[test]
    fn test_page_response_into_media() {
        let json = r#"{
            "data": {
                "Page": {
                    "media": [
                        { "id": 1, "title": { "romaji": "Cowboy Bebop" }, "genres": ["Action"] },
                        { "id": 5, "title": { "romaji": "Trigun" }, "genres": ["Action", "Comedy"] }
                    ]
                }
            }
        }"#;

        let response: GraphQlResponse = serde_json::from_str(json).unwrap();
        let media = response.into_media().unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[1].title.romaji, "Trigun");
    }

    #[test]
    fn test_error_response_into_media() {
        let json = r#"{
            "data": null,
            "errors": [{ "message": "Too Many Requests.", "status": 429 }]
        }"#;

        let response: GraphQlResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_media().unwrap_err(), "Too Many Requests.");
    }
}
