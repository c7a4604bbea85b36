//! Food layer with eaten-state bookkeeping.

use std::{collections::BTreeSet, ops::Deref};

use mazemap_core::{FoodCode, Tile, TileBitSet};

use crate::{error::Result, layer::Layer};

/// Food layer: pellets and energizers plus the set of tiles already eaten.
///
/// Energizer positions and the total food count are derived when the layer is
/// constructed and kept current by [`FoodLayer::set_content`]. At all times
/// `eaten_food_count() + uneaten_food_count() == total_food_count()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FoodLayer {
    layer: Layer,
    eaten: TileBitSet,
    energizer_tiles: BTreeSet<Tile>,
    total_food_count: usize,
    uneaten_food_count: usize,
}

impl FoodLayer {
    /// Wraps a byte layer and counts its food.
    ///
    /// Bytes that are not food codes are cleared with a warning.
    #[must_use]
    pub fn new(mut layer: Layer) -> Self {
        let unknown: Vec<Tile> = layer
            .tiles()
            .filter(|tile| {
                layer
                    .get(*tile)
                    .is_ok_and(|value| FoodCode::try_from(value).is_err())
            })
            .collect();
        for tile in unknown {
            tracing::warn!(%tile, "clearing unknown food code");
            let _ = layer.set(tile, FoodCode::Empty.to_byte());
        }

        let energizer_tiles = layer
            .tiles_containing(FoodCode::Energizer.to_byte())
            .collect();
        let total_food_count = layer
            .values()
            .iter()
            .filter(|value| **value != FoodCode::Empty.to_byte())
            .count();
        let eaten = TileBitSet::with_capacity(layer.values().len());
        Self {
            layer,
            eaten,
            energizer_tiles,
            total_food_count,
            uneaten_food_count: total_food_count,
        }
    }

    /// Underlying byte layer.
    #[must_use]
    pub const fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Food code at the tile; unknown bytes read as [`FoodCode::Empty`].
    pub fn content(&self, tile: Tile) -> Result<FoodCode> {
        self.layer.get(tile).map(FoodCode::from_byte_or_empty)
    }

    /// Tiles holding an energizer, eaten or not.
    #[must_use]
    pub const fn energizer_tiles(&self) -> &BTreeSet<Tile> {
        &self.energizer_tiles
    }

    /// Pellets plus energizers present at construction.
    #[must_use]
    pub const fn total_food_count(&self) -> usize {
        self.total_food_count
    }

    /// Food not yet eaten.
    #[must_use]
    pub const fn uneaten_food_count(&self) -> usize {
        self.uneaten_food_count
    }

    /// Food already eaten.
    #[must_use]
    pub fn eaten_food_count(&self) -> usize {
        self.eaten.count()
    }

    /// Whether the tile holds food that has not been eaten.
    pub fn has_food_at(&self, tile: Tile) -> Result<bool> {
        let index = self.layer.index(tile)?;
        Ok(self.layer.values()[index] != FoodCode::Empty.to_byte() && !self.eaten.contains(index))
    }

    /// Whether the tile held food that has been eaten.
    pub fn has_eaten_food_at(&self, tile: Tile) -> Result<bool> {
        self.layer.index(tile).map(|index| self.eaten.contains(index))
    }

    /// Marks the food at the tile as eaten.
    ///
    /// Tiles without food, including already eaten ones, are left untouched and
    /// reported with a warning.
    pub fn register_food_eaten_at(&mut self, tile: Tile) -> Result<()> {
        if !self.has_food_at(tile)? {
            tracing::warn!(%tile, "no food to eat at tile");
            return Ok(());
        }
        let index = self.layer.index(tile)?;
        if self.eaten.insert(index) {
            self.uneaten_food_count -= 1;
        }
        Ok(())
    }

    /// Replaces the food at the tile.
    ///
    /// Counts and energizers follow the edit. Food placed by the edit starts
    /// uneaten; every other tile keeps its eaten state.
    pub fn set_content(&mut self, tile: Tile, code: FoodCode) -> Result<()> {
        let index = self.layer.index(tile)?;
        if self.layer.values()[index] != FoodCode::Empty.to_byte() {
            self.total_food_count -= 1;
            if !self.eaten.remove(index) {
                self.uneaten_food_count -= 1;
            }
        }
        let _ = self.energizer_tiles.remove(&tile);

        self.layer.set(tile, code.to_byte())?;
        if code != FoodCode::Empty {
            self.total_food_count += 1;
            self.uneaten_food_count += 1;
        }
        if code == FoodCode::Energizer {
            let _ = self.energizer_tiles.insert(tile);
        }
        Ok(())
    }

    /// Eats every remaining pellet, leaving energizers in place.
    pub fn eat_all_pellets(&mut self) {
        self.eat_where(|code| code == FoodCode::Pellet);
    }

    /// Eats all remaining food.
    pub fn eat_all_food(&mut self) {
        self.eat_where(|code| code != FoodCode::Empty);
    }

    /// Restores every eaten food item.
    pub fn reset_food(&mut self) {
        self.eaten.clear();
        self.uneaten_food_count = self.total_food_count;
    }

    fn eat_where(&mut self, mut predicate: impl FnMut(FoodCode) -> bool) {
        for (index, value) in self.layer.values().iter().enumerate() {
            if predicate(FoodCode::from_byte_or_empty(*value)) && self.eaten.insert(index) {
                self.uneaten_food_count -= 1;
            }
        }
    }
}

impl Deref for FoodLayer {
    type Target = Layer;

    fn deref(&self) -> &Layer {
        &self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: u8 = 0;
    const P: u8 = 1;
    const Z: u8 = 2;

    fn food() -> FoodLayer {
        FoodLayer::new(Layer::from_rows(vec![vec![P, P, E], vec![Z, E, P], vec![E, Z, P]]))
    }

    fn assert_accounting(layer: &FoodLayer) {
        assert_eq!(
            layer.eaten_food_count() + layer.uneaten_food_count(),
            layer.total_food_count(),
            "eaten and uneaten food must add up to the total"
        );
    }

    #[test]
    fn construction_counts_food_and_energizers() {
        let layer = food();
        assert_eq!(layer.total_food_count(), 6);
        assert_eq!(layer.uneaten_food_count(), 6);
        assert_eq!(
            layer.energizer_tiles().iter().copied().collect::<Vec<_>>(),
            vec![Tile::new(1, 0), Tile::new(2, 1)]
        );
        assert_accounting(&layer);
    }

    #[test]
    fn eating_is_idempotent_per_tile() {
        let mut layer = food();
        let tile = Tile::new(0, 1);
        layer.register_food_eaten_at(tile).expect("in bounds");
        layer.register_food_eaten_at(tile).expect("in bounds");
        layer.register_food_eaten_at(Tile::new(0, 2)).expect("in bounds");

        assert_eq!(layer.uneaten_food_count(), 5);
        assert!(!layer.has_food_at(tile).expect("in bounds"));
        assert!(layer.has_eaten_food_at(tile).expect("in bounds"));
        assert!(!layer.has_eaten_food_at(Tile::new(0, 2)).expect("in bounds"));
        assert_accounting(&layer);
    }

    #[test]
    fn eating_outside_the_map_fails() {
        let mut layer = food();
        assert!(layer.register_food_eaten_at(Tile::new(3, 0)).is_err());
        assert_accounting(&layer);
    }

    #[test]
    fn editing_one_tile_keeps_the_rest_of_the_eaten_state() {
        let mut layer = food();
        layer.register_food_eaten_at(Tile::new(0, 0)).expect("in bounds");
        layer.register_food_eaten_at(Tile::new(1, 0)).expect("in bounds");

        layer
            .set_content(Tile::new(0, 2), FoodCode::Energizer)
            .expect("in bounds");
        assert!(layer.has_eaten_food_at(Tile::new(0, 0)).expect("in bounds"));
        assert_eq!(layer.total_food_count(), 7);
        assert_eq!(layer.uneaten_food_count(), 5);
        assert!(layer.energizer_tiles().contains(&Tile::new(0, 2)));
        assert_accounting(&layer);

        layer
            .set_content(Tile::new(1, 0), FoodCode::Empty)
            .expect("in bounds");
        assert!(!layer.has_eaten_food_at(Tile::new(1, 0)).expect("in bounds"));
        assert!(!layer.energizer_tiles().contains(&Tile::new(1, 0)));
        assert_eq!(layer.total_food_count(), 6);
        assert_eq!(layer.uneaten_food_count(), 5);
        assert_accounting(&layer);

        layer
            .set_content(Tile::new(0, 1), FoodCode::Pellet)
            .expect("in bounds");
        assert_eq!(layer.uneaten_food_count(), 5, "replacing uneaten food");
        assert!(layer.set_content(Tile::new(3, 3), FoodCode::Pellet).is_err());
        assert_accounting(&layer);
    }

    #[test]
    fn unknown_food_bytes_are_cleared() {
        let mut layer = FoodLayer::new(Layer::from_rows(vec![vec![P, 9, E]]));
        assert_eq!(layer.get(Tile::new(0, 1)).expect("in bounds"), E);
        assert_eq!(layer.total_food_count(), 1);
        assert!(!layer.has_food_at(Tile::new(0, 1)).expect("in bounds"));

        layer.eat_all_food();
        assert_eq!(layer.uneaten_food_count(), 0);
        assert_accounting(&layer);
    }

    #[test]
    fn eat_all_pellets_spares_energizers() {
        let mut layer = food();
        layer.eat_all_pellets();
        assert_eq!(layer.uneaten_food_count(), 2);
        for tile in layer.energizer_tiles().clone() {
            assert!(layer.has_food_at(tile).expect("in bounds"));
        }
        assert_accounting(&layer);

        layer.eat_all_food();
        assert_eq!(layer.uneaten_food_count(), 0);
        assert_accounting(&layer);

        layer.reset_food();
        assert_eq!(layer.uneaten_food_count(), layer.total_food_count());
        assert_eq!(layer.eaten_food_count(), 0);
    }
}
