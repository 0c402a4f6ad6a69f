pub mod genres;
pub mod matcher;
pub mod providers;
pub mod session;
pub mod slot;
pub mod title_search;

pub use matcher::{MatchResolver, MatchResult};
pub use session::MatchSession;
pub use slot::{SelectionSlot, SlotPhase};
