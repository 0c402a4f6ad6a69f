use crate::{error::AppResult, models::MediaRecord, services::providers::CatalogProvider};
use std::sync::Arc;

/// Service function for stateless anime search
///
/// Delegates to the configured CatalogProvider. Unlike a selection slot, a failed
/// lookup is reported to the caller instead of turning into an empty list.
pub async fn search_anime(
    provider: Arc<dyn CatalogProvider>,
    query: &str,
) -> AppResult<Vec<MediaRecord>> {
    provider.search_by_name(query).await
}
