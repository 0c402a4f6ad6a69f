/// AniList GraphQL provider
///
/// Both lookups are POSTs of `{query, variables}` to a single GraphQL endpoint and
/// read the first page of `Page.media`:
/// 1. Name search: `media(search: $search, type: ANIME)`, 5 per page
/// 2. Genre search: `media(genre_in: $genre_in, type: ANIME)`, 50 per page, with `seasonYear`
///
/// No authentication is needed for these queries.
use crate::{
    error::{AppError, AppResult},
    models::{GenreSearchVariables, GraphQlRequest, GraphQlResponse, MediaRecord, NameSearchVariables},
    services::providers::{CatalogProvider, GENRE_SEARCH_LIMIT, NAME_SEARCH_LIMIT},
};
use reqwest::{header, Client as HttpClient, StatusCode};
use serde::Serialize;
use tracing::instrument;

const PROVIDER: &str = "anilist";

const NAME_SEARCH_QUERY: &str = r#"
query ($id: Int, $page: Int, $perPage: Int, $search: String) {
  Page (page: $page, perPage: $perPage) {
    media (id: $id, search: $search, type: ANIME) {
      id
      title {
        romaji
        native
        english
      }
      coverImage { extraLarge large medium }
      genres
    }
  }
}
"#;

const GENRE_SEARCH_QUERY: &str = r#"
query ($id: Int, $page: Int, $perPage: Int, $genre_in: [String]) {
  Page (page: $page, perPage: $perPage) {
    media (id: $id, type: ANIME, genre_in: $genre_in) {
      id
      title {
        romaji
        native
        english
      }
      seasonYear
      coverImage { extraLarge large medium }
      genres
    }
  }
}
"#;

#[derive(Clone)]
pub struct AniListProvider {
    http_client: HttpClient,
    api_url: String,
}

impl AniListProvider {
    /// Creates a provider talking to the given GraphQL endpoint
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    /// POSTs one GraphQL operation and returns the first page of media
    async fn fetch_page<V: Serialize>(&self, query: &str, variables: V) -> AppResult<Vec<MediaRecord>> {
        let response = self
            .http_client
            .post(&self.api_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamUnavailable(format!(
                "AniList returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        parse_media_page(&response_text)
    }
}

/// Decodes a `{data:{Page:{media:[...]}}}` body
fn parse_media_page(body: &str) -> AppResult<Vec<MediaRecord>> {
    let response: GraphQlResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, response = %body, "Failed to deserialize AniList response");
        AppError::UpstreamUnavailable(format!("Failed to parse AniList response: {}", e))
    })?;

    response
        .into_media()
        .map_err(|message| AppError::UpstreamUnavailable(format!("AniList error: {}", message)))
}

#[async_trait::async_trait]
impl CatalogProvider for AniListProvider {
    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn search_by_name(&self, name: &str) -> AppResult<Vec<MediaRecord>> {
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let variables = NameSearchVariables {
            search: name,
            page: 1,
            per_page: NAME_SEARCH_LIMIT as u32,
        };

        let mut media = self.fetch_page(NAME_SEARCH_QUERY, variables).await?;
        media.truncate(NAME_SEARCH_LIMIT);

        tracing::info!(
            query = %name,
            results = media.len(),
            "Name search completed"
        );

        Ok(media)
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn search_by_genres(&self, genres: &[String]) -> AppResult<Vec<MediaRecord>> {
        if genres.is_empty() {
            return Err(AppError::InvalidInput(
                "Genre search needs at least one genre".to_string(),
            ));
        }

        let variables = GenreSearchVariables {
            genre_in: genres,
            page: 1,
            per_page: GENRE_SEARCH_LIMIT as u32,
        };

        let mut media = self.fetch_page(GENRE_SEARCH_QUERY, variables).await?;
        media.truncate(GENRE_SEARCH_LIMIT);

        tracing::info!(
            genres = ?genres,
            results = media.len(),
            "Genre search completed"
        );

        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nothing listens on the discard port, so any request fails fast
    fn create_unreachable_provider() -> AniListProvider {
        AniListProvider::new("http://127.0.0.1:9".to_string())
    }

    #[tokio::test]
    async fn test_empty_name_short_circuits() {
        let provider = create_unreachable_provider();
        let result = provider.search_by_name("").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_empty_genres_rejected() {
        let provider = create_unreachable_provider();
        let result = provider.search_by_genres(&[]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_unavailable() {
        let provider = create_unreachable_provider();
        let result = provider.search_by_name("bebop").await;
        assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));

        let result = provider.search_by_genres(&["Action".to_string()]).await;
        assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
    }

    #[test]
    fn test_parse_media_page_genre_search() {
        let body = r#"{
            "data": {
                "Page": {
                    "media": [
                        {
                            "id": 21,
                            "title": { "romaji": "ONE PIECE", "native": "ONE PIECE", "english": "ONE PIECE" },
                            "seasonYear": 1999,
                            "coverImage": { "extraLarge": null, "large": "https://img.test/l/21.jpg", "medium": "https://img.test/m/21.jpg" },
                            "genres": ["Action", "Adventure", "Comedy", "Drama", "Fantasy"]
                        },
                        {
                            "id": 101922,
                            "title": { "romaji": "Kimetsu no Yaiba", "native": "鬼滅の刃", "english": "Demon Slayer: Kimetsu no Yaiba" },
                            "seasonYear": 2019,
                            "coverImage": { "extraLarge": null, "large": "https://img.test/l/101922.jpg", "medium": null },
                            "genres": ["Action", "Adventure", "Drama", "Fantasy", "Supernatural"]
                        }
                    ]
                }
            }
        }"#;

        let media = parse_media_page(body).unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].id, 21);
        assert_eq!(media[0].season_year, Some(1999));
        assert_eq!(media[1].title.native.as_deref(), Some("鬼滅の刃"));
        assert_eq!(media[1].thumbnail(), Some("https://img.test/l/101922.jpg"));
    }

    #[test]
    fn test_parse_media_page_keeps_record_without_cover() {
        let body = r#"{
            "data": {
                "Page": {
                    "media": [
                        { "id": 1, "title": { "romaji": "Cowboy Bebop" }, "coverImage": null, "genres": ["Action"] },
                        { "id": 5, "title": { "romaji": "Cowboy Bebop: Tengoku no Tobira" }, "coverImage": { "medium": "https://img.test/m/5.jpg" }, "genres": ["Action"] }
                    ]
                }
            }
        }"#;

        let media = parse_media_page(body).unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].thumbnail(), None);
        assert_eq!(media[1].thumbnail(), Some("https://img.test/m/5.jpg"));
    }

    #[test]
    fn test_parse_media_page_empty() {
        let body = r#"{ "data": { "Page": { "media": [] } } }"#;
        assert!(parse_media_page(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_media_page_graphql_errors() {
        let body = r#"{ "data": null, "errors": [{ "message": "Validation error" }] }"#;
        let result = parse_media_page(body);
        assert!(matches!(result, Err(AppError::UpstreamUnavailable(msg)) if msg.contains("Validation error")));
    }

    #[test]
    fn test_parse_media_page_malformed_body() {
        let result = parse_media_page("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
    }
}
