use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{MediaRecord, Side},
    services::{
        matcher::{MatchResolver, MatchResult},
        slot::SelectionSlot,
    },
};

/// Both committed selections, copied out for a match attempt
pub type SelectionPair = (Option<MediaRecord>, Option<MediaRecord>);

/// One mounted match screen: a slot per side plus the latest match
#[derive(Debug, Clone)]
pub struct MatchSession {
    id: Uuid,
    left: SelectionSlot,
    right: SelectionSlot,
    latest_match: Option<MatchResult>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            left: SelectionSlot::new(Side::Left),
            right: SelectionSlot::new(Side::Right),
            latest_match: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Records activity at `now`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = self.last_active.max(now);
    }

    /// True once nothing has touched the session for longer than `max_idle`
    pub fn is_idle(&self, now: DateTime<Utc>, max_idle: Duration) -> bool {
        now.signed_duration_since(self.last_active) > max_idle
    }

    pub fn slot(&self, side: Side) -> &SelectionSlot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut SelectionSlot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn latest_match(&self) -> Option<&MatchResult> {
        self.latest_match.as_ref()
    }

    /// Prepares a match attempt
    ///
    /// Clears both slots' text and suggestions (selections stay) and drops the
    /// previous match, then hands back the selections to resolve.
    pub fn begin_match(&mut self) -> SelectionPair {
        self.left.reset_input();
        self.right.reset_input();
        self.latest_match = None;

        (self.left.committed().cloned(), self.right.committed().cloned())
    }

    /// Stores a successful match; failures leave the session without one
    pub fn finish_match(&mut self, outcome: AppResult<MatchResult>) -> AppResult<&MatchResult> {
        let result = outcome?;
        Ok(&*self.latest_match.insert(result))
    }

    /// Runs a whole match attempt against `resolver`
    pub async fn trigger_match(&mut self, resolver: &MatchResolver) -> AppResult<&MatchResult> {
        let (left, right) = self.begin_match();
        let outcome = resolver.resolve(left.as_ref(), right.as_ref()).await;
        self.finish_match(outcome)
    }

    /// Shows the next candidate of the latest match
    pub fn advance(&mut self) -> AppResult<&MatchResult> {
        let result = self
            .latest_match
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No match has been resolved yet".to_string()))?;
        result.advance()?;
        Ok(&*result)
    }
}
