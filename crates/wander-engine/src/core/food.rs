use glam::Vec2;
use crate::api::types::FoodId;

/// Ticks a food item stays on the floor before it spoils.
pub const DEFAULT_FOOD_LIFETIME: u32 = 600;

/// A morsel placed by a click.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub id: FoodId,
    /// World position.
    pub pos: Vec2,
    /// Only ever goes from true to false.
    pub alive: bool,
    /// Ticks since placement; only ever grows.
    pub age: u32,
}

/// The active food items, in placement order.
pub struct FoodField {
    items: Vec<FoodItem>,
    next_id: u32,
    lifetime: u32,
}

impl FoodField {
    pub fn new(lifetime: u32) -> Self {
        Self {
            items: Vec::with_capacity(32),
            next_id: 1,
            lifetime,
        }
    }

    /// Drop a fresh item at a world position.
    pub fn place(&mut self, pos: Vec2) -> FoodId {
        let id = FoodId(self.next_id);
        self.next_id += 1;
        self.items.push(FoodItem {
            id,
            pos,
            alive: true,
            age: 0,
        });
        id
    }

    pub fn get(&self, id: FoodId) -> Option<&FoodItem> {
        self.items.iter().find(|f| f.id == id)
    }

    /// Live item closest to `pos`; on ties the earliest placed wins.
    pub fn nearest_alive(&self, pos: Vec2) -> Option<&FoodItem> {
        let mut best: Option<(&FoodItem, f32)> = None;
        for item in self.items.iter().filter(|f| f.alive) {
            let d = item.pos.distance(pos);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((item, d)),
            }
        }
        best.map(|(item, _)| item)
    }

    /// Mark an item eaten. Returns true only for the call that killed it.
    pub fn consume(&mut self, id: FoodId) -> bool {
        match self.items.iter_mut().find(|f| f.id == id) {
            Some(item) if item.alive => {
                item.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Age every item, spoil the old ones and drop everything dead.
    pub fn age_and_reap(&mut self) {
        let lifetime = self.lifetime;
        for item in &mut self.items {
            item.age = item.age.saturating_add(1);
            if item.age > lifetime {
                item.alive = false;
            }
        }
        self.items.retain(|f| f.alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter()
    }

    pub fn alive(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter().filter(|f| f.alive)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for FoodField {
    fn default() -> Self {
        Self::new(DEFAULT_FOOD_LIFETIME)
    }
}
