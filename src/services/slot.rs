use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{MediaRecord, Side},
    services::providers::{CatalogProvider, NAME_SEARCH_LIMIT},
};

/// Where a slot is in the search-then-commit flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPhase {
    /// No text and nothing committed
    Idle,
    /// Text entered, no selection yet
    Searching,
    /// A suggestion has been chosen
    Committed,
}

/// A name search the slot wants issued
///
/// Only the response for the slot's latest ticket is applied; anything older is
/// discarded so a slow early response cannot replace newer suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// One side's search-and-select state
#[derive(Debug, Clone)]
pub struct SelectionSlot {
    side: Side,
    query_text: String,
    suggestions: Vec<MediaRecord>,
    committed: Option<MediaRecord>,
    latest_seq: u64,
}

impl SelectionSlot {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            query_text: String::new(),
            suggestions: Vec::new(),
            committed: None,
            latest_seq: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn suggestions(&self) -> &[MediaRecord] {
        &self.suggestions
    }

    pub fn committed(&self) -> Option<&MediaRecord> {
        self.committed.as_ref()
    }

    pub fn phase(&self) -> SlotPhase {
        if self.committed.is_some() {
            SlotPhase::Committed
        } else if self.query_text.is_empty() {
            SlotPhase::Idle
        } else {
            SlotPhase::Searching
        }
    }

    /// Records new input text and returns the search to issue, if any
    ///
    /// Empty text clears the suggestions and needs no search. Non-empty text
    /// discards any committed selection: the slot has to be committed again
    /// before it can take part in a match.
    pub fn begin_search(&mut self, text: &str) -> Option<SearchTicket> {
        self.latest_seq += 1;
        self.query_text = text.to_string();

        if text.is_empty() {
            self.suggestions.clear();
            return None;
        }

        if let Some(previous) = self.committed.take() {
            tracing::debug!(
                side = %self.side,
                media_id = previous.id,
                "Selection invalidated by new search"
            );
        }

        Some(SearchTicket {
            seq: self.latest_seq,
            query: self.query_text.clone(),
        })
    }

    /// Applies the outcome of a name search
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    /// A failed search leaves the slot with no suggestions.
    pub fn apply_search(&mut self, seq: u64, result: AppResult<Vec<MediaRecord>>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                side = %self.side,
                seq,
                latest_seq = self.latest_seq,
                "Discarding stale search response"
            );
            return false;
        }

        match result {
            Ok(mut suggestions) => {
                suggestions.truncate(NAME_SEARCH_LIMIT);
                self.suggestions = suggestions;
            }
            Err(e) => {
                tracing::warn!(
                    side = %self.side,
                    query = %self.query_text,
                    error = %e,
                    "Name search failed, showing no suggestions"
                );
                self.suggestions.clear();
            }
        }

        true
    }

    /// Handles a keystroke end to end against `catalog`
    pub async fn on_text_changed(&mut self, catalog: &dyn CatalogProvider, text: &str) {
        if let Some(ticket) = self.begin_search(text) {
            let result = catalog.search_by_name(&ticket.query).await;
            self.apply_search(ticket.seq, result);
        }
    }

    /// Commits `record` as this slot's selection
    pub fn on_suggestion_chosen(&mut self, record: MediaRecord) {
        // Any search still in flight belongs to the text being replaced
        self.latest_seq += 1;
        self.query_text = record.title.romaji.clone();
        self.suggestions.clear();

        tracing::info!(
            side = %self.side,
            media_id = record.id,
            title = %record.title.romaji,
            genres = ?record.genres,
            "Selection committed"
        );

        self.committed = Some(record);
    }

    /// Commits the listed suggestion with the given media id
    pub fn choose_suggestion(&mut self, media_id: i64) -> AppResult<MediaRecord> {
        let record = self
            .suggestions
            .iter()
            .find(|s| s.id == media_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Anime {} is not among the {} suggestions",
                    media_id, self.side
                ))
            })?;

        self.on_suggestion_chosen(record.clone());
        Ok(record)
    }

    /// Clears the input text and suggestions, keeping the committed selection
    pub fn reset_input(&mut self) {
        self.latest_seq += 1;
        self.query_text.clear();
        self.suggestions.clear();
    }
}
