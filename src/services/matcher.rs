use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MediaRecord,
    services::{genres, providers::CatalogProvider},
};

/// Ranked candidates for one match attempt, with the one on display
#[derive(Debug, Clone)]
pub struct MatchResult {
    genres: Vec<String>,
    candidates: Vec<MediaRecord>,
    cursor: usize,
    resolved_at: DateTime<Utc>,
}

impl MatchResult {
    /// Ranks `candidates` newest season first; `None` when there are none
    pub fn new(genres: Vec<String>, candidates: Vec<MediaRecord>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }

        Some(Self {
            genres,
            candidates: rank_candidates(candidates),
            cursor: 0,
            resolved_at: Utc::now(),
        })
    }

    /// Genres shared by both selections, in the left selection's order
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn candidates(&self) -> &[MediaRecord] {
        &self.candidates
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }

    pub fn current(&self) -> &MediaRecord {
        &self.candidates[self.cursor]
    }

    pub fn has_more(&self) -> bool {
        self.cursor + 1 < self.candidates.len()
    }

    /// Moves to the next candidate
    ///
    /// Fails with `NoMoreCandidates` on the last one, leaving the cursor where it is.
    /// There is no way back.
    pub fn advance(&mut self) -> AppResult<&MediaRecord> {
        if !self.has_more() {
            return Err(AppError::NoMoreCandidates);
        }
        self.cursor += 1;
        Ok(self.current())
    }
}

/// Sorts by season year, newest first
///
/// Records without a season year go last. The sort is stable, so equal years keep
/// the catalog's order.
pub fn rank_candidates(mut candidates: Vec<MediaRecord>) -> Vec<MediaRecord> {
    candidates.sort_by(|a, b| match (a.season_year, b.season_year) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    candidates
}

/// Turns two committed selections into a ranked match
pub struct MatchResolver {
    catalog: Arc<dyn CatalogProvider>,
}

impl MatchResolver {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { catalog }
    }

    /// Intersects the selections' genres and looks up anime carrying them
    pub async fn resolve(
        &self,
        left: Option<&MediaRecord>,
        right: Option<&MediaRecord>,
    ) -> AppResult<MatchResult> {
        let (left, right) = match (left, right) {
            (Some(l), Some(r)) if !l.genres.is_empty() && !r.genres.is_empty() => (l, r),
            _ => return Err(AppError::IncompleteSelection),
        };

        let common = genres::intersect(&left.genres, &right.genres);
        if common.is_empty() {
            tracing::info!(
                left = left.id,
                right = right.id,
                "No common genre between selections"
            );
            return Err(AppError::NoCommonGenre);
        }

        let candidates = self.catalog.search_by_genres(&common).await?;
        let fetched = candidates.len();

        let result = MatchResult::new(common, candidates).ok_or(AppError::NoCandidatesFound)?;

        tracing::info!(
            left = left.id,
            right = right.id,
            genres = ?result.genres(),
            candidates = fetched,
            top = result.current().id,
            "Match resolved"
        );

        Ok(result)
    }
}
