//! The `.world` text format.
//!
//! ```text
//! !terrain
//! key=value
//! !data
//! #01,#01,#01
//! !food
//! !data
//! #00,#01,#00
//! ```
//!
//! Properties precede the `!data` marker of their section and are written
//! sorted by key. Each data line is one row of `#XX` tokens. Parsing never
//! aborts: malformed lines are logged and skipped, rejected tile bytes are
//! logged and replaced by zero.

use std::fmt::Write as _;

use crate::{layer::Layer, WorldMap};

/// Marker opening the terrain section.
pub const TERRAIN_MARKER: &str = "!terrain";
/// Marker opening the food section.
pub const FOOD_MARKER: &str = "!food";
/// Marker separating a section's properties from its grid data.
pub const DATA_MARKER: &str = "!data";

/// Builds a world map from the lines of a `.world` text.
///
/// `is_valid_terrain` and `is_valid_food` decide which bytes each layer
/// accepts. The map takes its dimensions from the terrain layer; a food layer
/// of different size is resized to match.
pub fn parse<'a, I, T, F>(lines: I, is_valid_terrain: T, is_valid_food: F) -> WorldMap
where
    I: IntoIterator<Item = &'a str>,
    T: Fn(u8) -> bool,
    F: Fn(u8) -> bool,
{
    let mut lines: Vec<(usize, &str)> = lines
        .into_iter()
        .map(|line| line.trim_end_matches(['\r', '\n']))
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .collect();
    while lines.last().is_some_and(|(_, line)| line.trim().is_empty()) {
        let _ = lines.pop();
    }

    let terrain_start = lines.iter().position(|(_, line)| line.trim() == TERRAIN_MARKER);
    let food_start = lines.iter().position(|(_, line)| line.trim() == FOOD_MARKER);

    let terrain_lines = match (terrain_start, food_start) {
        (Some(start), Some(end)) if end > start => &lines[start + 1..end],
        (Some(start), _) => &lines[start + 1..],
        (None, _) => {
            tracing::warn!("map text has no {TERRAIN_MARKER} section");
            &lines[..0]
        }
    };
    let food_lines = match (food_start, terrain_start) {
        (Some(start), Some(end)) if end > start => &lines[start + 1..end],
        (Some(start), _) => &lines[start + 1..],
        (None, _) => {
            tracing::warn!("map text has no {FOOD_MARKER} section");
            &lines[..0]
        }
    };

    let terrain = parse_layer("terrain", terrain_lines, &is_valid_terrain);
    let mut food = parse_layer("food", food_lines, &is_valid_food);
    if (food.num_rows(), food.num_cols()) != (terrain.num_rows(), terrain.num_cols()) {
        if food_start.is_some() {
            tracing::warn!(
                terrain_rows = terrain.num_rows(),
                terrain_cols = terrain.num_cols(),
                food_rows = food.num_rows(),
                food_cols = food.num_cols(),
                "food layer size differs from terrain layer size, resizing"
            );
        }
        food = food.resized(terrain.num_rows(), terrain.num_cols());
    }

    WorldMap::from_layers(terrain, food)
}

/// Writes both layers of the map in the `.world` format.
#[must_use]
pub fn serialize(map: &WorldMap) -> String {
    let mut text = String::new();
    write_layer(&mut text, TERRAIN_MARKER, map.terrain().layer());
    write_layer(&mut text, FOOD_MARKER, map.food().layer());
    text
}

fn write_layer(text: &mut String, marker: &str, layer: &Layer) {
    text.push_str(marker);
    text.push('\n');
    for (key, value) in layer.properties() {
        let _ = writeln!(text, "{key}={value}");
    }
    text.push_str(DATA_MARKER);
    text.push('\n');
    for row in 0..layer.num_rows() {
        let values = layer.row_values(row).unwrap_or_default();
        for (col, value) in values.iter().enumerate() {
            if col > 0 {
                text.push(',');
            }
            let _ = write!(text, "#{value:02X}");
        }
        text.push('\n');
    }
}

fn parse_layer(name: &str, lines: &[(usize, &str)], is_valid: &dyn Fn(u8) -> bool) -> Layer {
    let data_start = lines.iter().position(|(_, line)| line.trim() == DATA_MARKER);
    let (property_lines, data_lines) = match data_start {
        Some(index) => (&lines[..index], &lines[index + 1..]),
        None => {
            tracing::warn!(layer = name, "section has no {DATA_MARKER} marker");
            (lines, &lines[..0])
        }
    };

    let mut grid: Vec<Vec<u8>> = Vec::with_capacity(data_lines.len());
    for &(line_number, line) in data_lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .enumerate()
            .map(|(col, token)| parse_tile_value(name, line_number, col, token, is_valid))
            .collect::<Vec<_>>();
        if let Some(first) = grid.first() {
            if row.len() != first.len() {
                tracing::warn!(
                    layer = name,
                    line = line_number,
                    expected = first.len(),
                    found = row.len(),
                    "inconsistent column count"
                );
            }
        }
        grid.push(row);
    }

    let mut layer = Layer::from_rows(grid);
    for &(line_number, line) in property_lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                let _ = layer.set_property(key.trim(), value.trim());
            }
            _ => tracing::warn!(layer = name, line = line_number, text = line, "malformed property line"),
        }
    }
    layer
}

fn parse_tile_value(
    layer: &str,
    line: usize,
    col: usize,
    token: &str,
    is_valid: &dyn Fn(u8) -> bool,
) -> u8 {
    match decode_byte(token) {
        Some(value) if value >= 0 && is_valid(value as u8) => value as u8,
        Some(value) => {
            tracing::warn!(layer, line, col, value, "invalid tile code, using 0");
            0
        }
        None => {
            tracing::warn!(layer, line, col, token = token.trim(), "unreadable tile value, using 0");
            0
        }
    }
}

/// Decodes a signed byte literal: decimal, `#`/`0x` hexadecimal or `0` octal.
pub(crate) fn decode_byte(token: &str) -> Option<i8> {
    let token = token.trim();
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix('#')
        .or_else(|| unsigned.strip_prefix("0x"))
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i32::from_str_radix(digits, radix).ok()?;
    i8::try_from(if negative { -magnitude } else { magnitude }).ok()
}
