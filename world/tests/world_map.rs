use mazemap_core::{FoodCode, LayerId, TerrainCode, Tile};
use mazemap_world::{Layer, WorldMap};

const ARC_NW: u8 = TerrainCode::ArcNw.to_byte();
const ARC_NE: u8 = TerrainCode::ArcNe.to_byte();
const ARC_SE: u8 = TerrainCode::ArcSe.to_byte();
const ARC_SW: u8 = TerrainCode::ArcSw.to_byte();
const WALL_H: u8 = TerrainCode::WallH.to_byte();
const WALL_V: u8 = TerrainCode::WallV.to_byte();
const TUNNEL: u8 = TerrainCode::Tunnel.to_byte();

fn boxed_map() -> WorldMap {
    let mut terrain = Layer::from_rows(vec![
        vec![ARC_NW, WALL_H, WALL_H, ARC_NE],
        vec![TUNNEL, 0, 0, TUNNEL],
        vec![WALL_V, 0, 0, WALL_V],
        vec![ARC_SW, WALL_H, WALL_H, ARC_SE],
    ]);
    let _ = terrain.set_property("pos_pac", "(2,1)");
    let mut food = Layer::from_rows(vec![
        vec![0, 0, 0, 0],
        vec![0, 1, 2, 0],
        vec![0, 1, 1, 0],
        vec![0, 0, 0, 0],
    ]);
    let _ = food.set_property("color_pellet", "#febdb4");
    WorldMap::from_layers(terrain, food)
}

#[test]
fn text_round_trip_preserves_grids_and_properties() {
    let map = boxed_map();
    let restored = WorldMap::parse(&map.to_text());

    assert_eq!(restored.terrain().layer(), map.terrain().layer());
    assert_eq!(restored.food().layer(), map.food().layer());
    assert_eq!(restored.terrain().tile_property("pos_pac"), Some(Tile::new(2, 1)));
    assert_eq!(restored.to_text(), map.to_text(), "serialization is stable");
}

#[test]
fn parsed_property_order_does_not_matter() {
    let text = "!terrain\nb=2\na=1\n!data\n#00\n!food\n!data\n#00\n";
    let map = WorldMap::parse(text);
    assert_eq!(map.to_text(), "!terrain\na=1\nb=2\n!data\n#00\n!food\n!data\n#00\n");
}

#[test]
fn tunnels_on_both_borders_form_one_portal() {
    let map = boxed_map();
    let portals = map.terrain().portals();
    assert_eq!(portals.len(), 1, "only row 1 has a tunnel pair");
    assert_eq!(portals[0].left(), Tile::new(1, 0));
    assert_eq!(portals[0].right(), Tile::new(1, 3));
    assert_eq!(portals[0].depth(), 2);
}

#[test]
fn save_and_load_through_a_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("box.world");
    let mut map = boxed_map();
    map.save_to_file(&path).expect("save");
    let url = map.url().expect("saving records the location").to_owned();
    assert!(url.starts_with("file://"), "unexpected url {url}");

    let loaded = WorldMap::load_from_file(&path).expect("load");
    assert_eq!(loaded.terrain().layer(), map.terrain().layer());
    assert_eq!(loaded.url(), Some(url.as_str()));

    let by_url = WorldMap::load_from_url(&url).expect("load by url");
    assert_eq!(by_url.food().layer(), map.food().layer());
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = WorldMap::load_from_file(dir.path().join("absent.world"));
    assert!(matches!(result, Err(mazemap_world::WorldMapError::Io(_))));
}

#[test]
fn eating_keeps_food_accounting_balanced() {
    let mut map = boxed_map();
    let total = map.food().total_food_count();
    assert_eq!(total, 4);

    map.food_mut()
        .register_food_eaten_at(Tile::new(2, 1))
        .expect("in bounds");
    map.food_mut()
        .register_food_eaten_at(Tile::new(2, 1))
        .expect("eating twice is a no-op");
    map.food_mut().eat_all_pellets();

    let food = map.food();
    assert_eq!(food.uneaten_food_count(), 1, "only the energizer is left");
    assert_eq!(food.eaten_food_count() + food.uneaten_food_count(), total);
    assert!(food.has_food_at(Tile::new(1, 2)).expect("in bounds"));

    map.food_mut().eat_all_food();
    assert_eq!(map.food().uneaten_food_count(), 0);
    assert_eq!(map.food().total_food_count(), total);
}

#[test]
fn empty_food_layer_has_nothing_to_eat() {
    let mut map = boxed_map();
    for tile in map.food().tiles().collect::<Vec<_>>() {
        map.set_content(LayerId::Food, tile, FoodCode::Empty.to_byte())
            .expect("in bounds");
    }
    assert_eq!(map.food().total_food_count(), 0);
    assert_eq!(map.food().uneaten_food_count(), 0);
}

#[test]
fn mirroring_is_an_involution_and_bounds_checked() {
    let map = boxed_map();
    for tile in map.terrain().tiles() {
        let mirrored = map.mirror_position(tile).expect("in bounds");
        assert_eq!(mirrored.row(), tile.row());
        assert_eq!(map.mirror_position(mirrored).expect("in bounds"), tile);
    }
    assert!(map.mirror_position(Tile::new(0, 4)).is_err());
    assert!(map.mirror_position(Tile::new(-1, 0)).is_err());
}
