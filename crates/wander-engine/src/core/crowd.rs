use crate::components::character::Character;

/// Character storage using a flat Vec, kept in painter's order each frame.
pub struct Crowd {
    characters: Vec<Character>,
}

impl Crowd {
    pub fn new() -> Self {
        Self {
            characters: Vec::with_capacity(32),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            characters: Vec::with_capacity(capacity),
        }
    }

    pub fn spawn(&mut self, character: Character) {
        self.characters.push(character);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    /// Painter's order: smallest `wy` (furthest back) first.
    /// Stable, so characters at equal depth keep their relative order.
    pub fn sort_by_depth(&mut self) {
        self.characters.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl Default for Crowd {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CharacterId;
    use glam::Vec2;

    fn at(id: u32, wy: f32) -> Character {
        Character::at(CharacterId(id), Vec2::new(0.5, wy), 0.001, 6)
    }

    #[test]
    fn spawn_appends() {
        let mut crowd = Crowd::new();
        assert!(crowd.is_empty());
        crowd.spawn(at(1, 0.2));
        crowd.spawn(at(2, 0.7));
        assert_eq!(crowd.len(), 2);
        let ids: Vec<u32> = crowd.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn depth_sort_is_back_to_front_and_stable() {
        let mut crowd = Crowd::new();
        crowd.spawn(at(1, 0.9));
        crowd.spawn(at(2, 0.1));
        crowd.spawn(at(3, 0.5));
        crowd.spawn(at(4, 0.1));
        crowd.sort_by_depth();
        let ids: Vec<u32> = crowd.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }
}
