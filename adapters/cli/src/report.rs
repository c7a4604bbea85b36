//! Human-readable summary of a map and its traced obstacles.

use std::fmt;

use mazemap_system_obstacles::{BuildResult, Obstacle};
use mazemap_world::WorldMap;

/// Borrowed view rendering a map report through [`fmt::Display`].
pub(crate) struct Report<'a> {
    map: &'a WorldMap,
    result: &'a BuildResult,
    rectangles: bool,
}

impl<'a> Report<'a> {
    pub(crate) const fn new(map: &'a WorldMap, result: &'a BuildResult, rectangles: bool) -> Self {
        Self {
            map,
            result,
            rectangles,
        }
    }

    fn write_obstacle(&self, f: &mut fmt::Formatter<'_>, index: usize, obstacle: &Obstacle) -> fmt::Result {
        let start = obstacle.start_point();
        write!(
            f,
            "  #{index} start ({}, {}) segments {} outline {}px",
            start.x,
            start.y,
            obstacle.num_segments(),
            obstacle.outline_length()
        )?;
        f.write_str(if obstacle.is_closed() { " closed" } else { " open" })?;
        if obstacle.is_border_obstacle() {
            f.write_str(" border")?;
        }
        if !obstacle.is_complete() {
            f.write_str(" incomplete")?;
        }
        writeln!(f, " encoding {}", obstacle.encoding())?;

        if self.rectangles {
            for rect in obstacle.inner_area_rectangles().unwrap_or_default() {
                writeln!(
                    f,
                    "      rect x {} y {} w {} h {}",
                    rect.x(),
                    rect.y(),
                    rect.width(),
                    rect.height()
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.map;
        write!(f, "map: {}x{}", map.num_rows(), map.num_cols())?;
        if let Some(url) = map.url() {
            write!(f, " ({url})")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "properties: terrain {}, food {}",
            map.terrain().properties().len(),
            map.food().properties().len()
        )?;

        let food = map.food();
        writeln!(
            f,
            "food: total {}, uneaten {}, energizers {}",
            food.total_food_count(),
            food.uneaten_food_count(),
            food.energizer_tiles().len()
        )?;
        for portal in map.terrain().portals() {
            writeln!(f, "portal: {} <-> {}", portal.left(), portal.right())?;
        }

        let obstacles = &self.result.obstacles;
        writeln!(
            f,
            "obstacles: {} ({} closed)",
            obstacles.len(),
            self.result.closed_count()
        )?;
        for (index, obstacle) in obstacles.iter().enumerate() {
            self.write_obstacle(f, index, obstacle)?;
        }

        if self.result.error_tiles.is_empty() {
            writeln!(f, "error tiles: none")
        } else {
            let tiles: Vec<String> = self
                .result
                .error_tiles
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(f, "error tiles: {}", tiles.join(" "))
        }
    }
}
