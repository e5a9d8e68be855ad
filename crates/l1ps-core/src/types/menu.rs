//! New-menu seed entries.

use serde::{Deserialize, Serialize};

/// One entry of a new trigger menu, as handed over by the excluded menu
/// parsing layer: the seed name and its menu ordering index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSeed {
    pub index: u64,
    pub name: String,
}

impl MenuSeed {
    pub fn new(index: u64, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}
