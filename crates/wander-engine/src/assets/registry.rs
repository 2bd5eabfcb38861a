use std::collections::HashMap;
use crate::components::sprite::{SheetInfo, SpriteKey};

/// Metrics of every sheet loaded so far, keyed by sprite.
///
/// Sheets arrive one at a time while the scene is already running, so a
/// lookup for a key that has not loaded (or failed to) returns `None` and
/// callers skip the draw.
pub struct SpriteLibrary {
    sheets: HashMap<SpriteKey, SheetInfo>,
}

impl SpriteLibrary {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::with_capacity(SpriteKey::COUNT),
        }
    }

    /// Record a loaded sheet. Sheets with no frames are ignored.
    pub fn insert(&mut self, key: SpriteKey, info: SheetInfo) {
        if info.frame_count == 0 {
            log::warn!("sprite sheet {} has no frames, ignoring", key.name());
            return;
        }
        self.sheets.insert(key, info);
    }

    /// Look up a sheet by key. Returns None if not loaded.
    pub fn get(&self, key: SpriteKey) -> Option<&SheetInfo> {
        self.sheets.get(&key)
    }

    pub fn frame_count(&self, key: SpriteKey) -> Option<usize> {
        self.sheets.get(&key).map(|s| s.frame_count)
    }

    pub fn contains(&self, key: SpriteKey) -> bool {
        self.sheets.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl Default for SpriteLibrary {
    fn default() -> Self {
        Self::new()
    }
}
