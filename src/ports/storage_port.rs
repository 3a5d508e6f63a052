//! Journal persistence port trait.

use crate::domain::error::JournalError;
use crate::domain::trade::Trade;

/// The load/save contract the core expects from persistence. The trade list
/// lives under a single named location; order is preserved verbatim.
pub trait StoragePort {
    fn load(&self) -> Result<Vec<Trade>, JournalError>;

    fn save(&self, trades: &[Trade]) -> Result<(), JournalError>;
}
