//! Level layouts and their conversion into registered entities.

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    components::Team,
    constants::TILE_SIZE,
    entities::{make_player, make_tree, make_turret, make_wall},
    quadtree::Aabb2,
    simulation::SimulationError,
    state::StateDb,
    types::PlayerNumber,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapEntity {
    Player,
    Tree,
    Wall,
    Turret(Team),
}

impl MapEntity {
    fn from_char(c: char) -> Option<Option<MapEntity>> {
        match c {
            '.' | ' ' => Some(None),
            'P' => Some(Some(MapEntity::Player)),
            'T' => Some(Some(MapEntity::Tree)),
            'W' => Some(Some(MapEntity::Wall)),
            'E' => Some(Some(MapEntity::Turret(Team::Enemy))),
            'F' => Some(Some(MapEntity::Turret(Team::Friendly))),
            _ => None,
        }
    }
}

/// Errors that can occur while parsing a level layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The layout has no rows, or only empty rows
    #[error("Level layout is empty")]
    Empty,

    /// A row is shorter or longer than the first row
    #[error("Level row {row} has {found} tiles, expected {expected}. Every row must be as wide as the first")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character that does not name any entity
    #[error("Unknown tile '{tile}' at row {row}, column {column}")]
    UnknownTile {
        tile: char,
        row: usize,
        column: usize,
    },
}

/// Tile grid of a level. `entities` is row-major, `dimensions.x` wide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMap {
    pub dimensions: UVec2,
    pub entities: Vec<Option<MapEntity>>,
}

impl LevelMap {
    /// Parses a layout with one line per row:
    ///
    /// | char      | entity          |
    /// |-----------|-----------------|
    /// | `.` / ` ` | nothing         |
    /// | `P`       | player tank     |
    /// | `T`       | tree            |
    /// | `W`       | wall            |
    /// | `E`       | enemy turret    |
    /// | `F`       | friendly turret |
    ///
    /// Leading and trailing blank lines are ignored.
    pub fn from_ascii(layout: &str) -> Result<Self, LevelError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.trim().is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|line| !line.trim().is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => return Err(LevelError::Empty),
        };

        let width = rows[0].chars().count();
        let mut entities = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for (column, tile) in line.chars().enumerate() {
                let entity = MapEntity::from_char(tile).ok_or(LevelError::UnknownTile {
                    tile,
                    row,
                    column,
                })?;
                entities.push(entity);
            }
        }

        Ok(Self {
            dimensions: UVec2::new(width as u32, rows.len() as u32),
            entities,
        })
    }

    /// Playfield covered by the level, with the north-west corner at the
    /// origin.
    pub fn world_bounds(&self) -> Aabb2 {
        Aabb2::new(Vec2::ZERO, self.dimensions.as_vec2() * TILE_SIZE)
    }

    /// Number of player tanks the level places.
    pub fn player_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|entity| **entity == Some(MapEntity::Player))
            .count()
    }

    /// World position of the center of a tile.
    pub fn tile_center(&self, column: u32, row: u32) -> Vec2 {
        Vec2::new(column as f32 + 0.5, row as f32 + 0.5) * TILE_SIZE
    }
}

/// Registers every entity the level places, numbering players from 1 in
/// row-major scan order, then commits so the level is the first baseline.
pub fn init_map(state_db: &mut StateDb, map: &LevelMap) -> Result<(), SimulationError> {
    let mut player_counter: PlayerNumber = 0;
    let width = map.dimensions.x.max(1);

    for (index, entity) in map.entities.iter().enumerate() {
        let Some(entity) = entity else {
            continue;
        };
        let index = index as u32;
        let position = map.tile_center(index % width, index / width);

        let components = match entity {
            MapEntity::Player => {
                player_counter += 1;
                make_player(position, player_counter)
            }
            MapEntity::Tree => make_tree(position),
            MapEntity::Wall => make_wall(position),
            MapEntity::Turret(team) => make_turret(position, *team),
        };
        state_db.register(components)?;
    }

    state_db.post_frame_update();
    state_db.commit_prediction();
    Ok(())
}
