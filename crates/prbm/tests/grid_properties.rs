use glam::{IVec2, IVec3, Vec3};
use prbm::{BlockSet, Error, Grid, TileRange, block_of};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1..=1024i32, -1_000_000..=1_000_000i32, -1_000_000..=1_000_000i32)
        .prop_map(|(size, ox, oz)| Grid::new(size, IVec2::new(ox, oz)).unwrap())
}

fn arb_tile() -> impl Strategy<Value = IVec2> {
    (-1_000_000..=1_000_000i32, -1_000_000..=1_000_000i32).prop_map(|(x, z)| IVec2::new(x, z))
}

proptest! {
    #[test]
    fn tile_corners_map_back_to_tile(grid in arb_grid(), tile in arb_tile()) {
        let bounds = grid.tile_to_world(tile).unwrap();
        prop_assert_eq!(grid.world_to_tile(bounds.min).unwrap(), tile);
        prop_assert_eq!(grid.world_to_tile(bounds.max).unwrap(), tile);
        prop_assert_eq!(bounds.max - bounds.min, IVec2::splat(grid.tile_size() - 1));
    }

    #[test]
    fn world_point_lies_in_its_tile(
        grid in arb_grid(),
        x in -500_000_000..=500_000_000i32,
        z in -500_000_000..=500_000_000i32,
    ) {
        let world = IVec2::new(x, z);
        let tile = grid.world_to_tile(world).unwrap();
        prop_assert!(grid.tile_to_world(tile).unwrap().contains(world));
    }

    #[test]
    fn neighbouring_tiles_do_not_overlap(grid in arb_grid(), tile in arb_tile()) {
        let here = grid.tile_to_world(tile).unwrap();
        let east = grid.tile_to_world(tile + IVec2::X).unwrap();
        let south = grid.tile_to_world(tile + IVec2::Y).unwrap();
        prop_assert_eq!(east.min.x, here.max.x + 1);
        prop_assert_eq!(south.min.y, here.max.y + 1);
    }

    #[test]
    fn tile_range_iterates_every_tile_once(
        a in (-50..50i32, -50..50i32),
        b in (-50..50i32, -50..50i32),
    ) {
        let range = TileRange::new(IVec2::new(a.0, a.1), IVec2::new(b.0, b.1));
        let tiles: Vec<IVec2> = range.iter().collect();
        prop_assert_eq!(u64::try_from(tiles.len()).unwrap(), range.len());
        prop_assert!(tiles.iter().all(|t| range.contains(*t)));
        let unique: std::collections::HashSet<IVec2> = tiles.iter().copied().collect();
        prop_assert_eq!(unique.len(), tiles.len());
    }

    #[test]
    fn block_set_has_no_duplicates(
        positions in prop::collection::vec(
            (-100.0f32..100.0, -64.0f32..320.0, -100.0f32..100.0),
            0..200,
        ),
    ) {
        let positions: Vec<Vec3> = positions.into_iter().map(|(x, y, z)| Vec3::new(x, y, z)).collect();
        let set = BlockSet::from_positions(positions.iter().copied(), |p| p);
        let sorted = set.clone().into_sorted();

        let mut deduped = sorted.clone();
        deduped.dedup();
        prop_assert_eq!(&deduped, &sorted);
        prop_assert_eq!(sorted.len(), set.len());
        prop_assert!(sorted.len() <= positions.len());

        for p in &positions {
            prop_assert!(set.contains(p.floor().as_ivec3()));
        }
    }

    #[test]
    fn block_tile_matches_world_tile(grid in arb_grid(), x in -1_000_000..1_000_000i32, y in -64..320i32, z in -1_000_000..1_000_000i32) {
        let block = IVec3::new(x, y, z);
        prop_assert_eq!(
            grid.tile_of_block(block).unwrap(),
            grid.world_to_tile(IVec2::new(x, z)).unwrap()
        );
    }

    #[test]
    fn any_tile_maps_or_reports_out_of_range(
        size in 1..=1024i32,
        offset in any::<(i32, i32)>(),
        tile in any::<(i32, i32)>(),
    ) {
        let grid = Grid::new(size, IVec2::new(offset.0, offset.1)).unwrap();
        let tile = IVec2::new(tile.0, tile.1);
        let min_x = i64::from(tile.x) * i64::from(size) + i64::from(offset.0);
        let fits_x = i32::try_from(min_x).is_ok() && i32::try_from(min_x + i64::from(size) - 1).is_ok();

        match grid.tile_to_world(tile) {
            Ok(bounds) => {
                prop_assert!(fits_x);
                prop_assert_eq!(grid.world_to_tile(bounds.min).unwrap(), tile);
            }
            Err(err) => prop_assert!(matches!(err, Error::OutOfRange { .. }), "unexpected error: {:?}", err),
        }
    }

    #[test]
    fn any_world_point_maps_or_reports_out_of_range(
        size in 1..=1024i32,
        offset in any::<(i32, i32)>(),
        world in any::<(i32, i32)>(),
    ) {
        let grid = Grid::new(size, IVec2::new(offset.0, offset.1)).unwrap();
        let world = IVec2::new(world.0, world.1);
        match grid.world_to_tile(world) {
            Ok(tile) => {
                // The containing tile may itself reach past i32 at its far corner.
                if let Ok(bounds) = grid.tile_to_world(tile) {
                    prop_assert!(bounds.contains(world));
                }
            }
            Err(err) => prop_assert!(matches!(err, Error::OutOfRange { .. }), "unexpected error: {:?}", err),
        }
    }

    #[test]
    fn far_vertices_never_collapse_into_edge_blocks(x in 2.2e9f32..1e30, sign in any::<bool>()) {
        let x = if sign { x } else { -x };
        prop_assert_eq!(block_of(Vec3::new(x, 0.0, 0.0)), None);
    }
}
