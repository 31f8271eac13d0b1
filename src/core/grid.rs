//! Level grid: tile data, static features, and spatial queries.

use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::core::monster::MonsterColor;

/// Level document as the editor writes it: one field, the tile rows.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDoc {
    pub map: Vec<String>,
}

#[derive(Debug, Error)]
pub enum MalformedLevel {
    #[error("level document unreadable: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("level document is not valid JSON: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("level has no rows")]
    Empty,
    #[error("level rows have unequal lengths")]
    RaggedRows,
    #[error("unknown tile symbol {0:?}")]
    UnknownSymbol(char),
    #[error("level has no player spawn")]
    MissingPlayerSpawn,
    #[error("level has no exit")]
    MissingExit,
    #[error("level has more than one exit")]
    DuplicateExit,
    #[error("level has more than one compass")]
    DuplicateCompass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    PlayerSpawn,
    MonsterSpawn(MonsterColor),
    RealExit,
    FakeExit,
    Compass,
}

impl Tile {
    /// `M` is the editor's generic monster marker; it spawns red.
    fn from_symbol(c: char) -> Result<Tile, MalformedLevel> {
        Ok(match c {
            '#' => Tile::Wall,
            '.' | ' ' => Tile::Empty,
            'P' => Tile::PlayerSpawn,
            'M' | 'R' => Tile::MonsterSpawn(MonsterColor::Red),
            'B' => Tile::MonsterSpawn(MonsterColor::Blue),
            'G' => Tile::MonsterSpawn(MonsterColor::Green),
            'E' => Tile::RealExit,
            'F' => Tile::FakeExit,
            'C' => Tile::Compass,
            other => return Err(MalformedLevel::UnknownSymbol(other)),
        })
    }
}

/// The static world. Immutable for the whole session except the one-way
/// `compass_taken` flip.
#[derive(Debug)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
    player_start: (f32, f32),
    monster_starts: Vec<(f32, f32, MonsterColor)>,
    exit: (usize, usize),
    fake_exits: Vec<(usize, usize)>,
    compass_pos: Option<(f32, f32)>,
    compass_taken: bool,
}

impl Grid {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MalformedLevel> {
        let text = std::fs::read_to_string(path)?;
        let doc: LevelDoc = serde_json::from_str(&text)?;
        Self::from_doc(&doc)
    }

    pub fn from_doc(doc: &LevelDoc) -> Result<Self, MalformedLevel> {
        let width = doc.map.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(MalformedLevel::Empty);
        }

        let mut tiles = Vec::with_capacity(doc.map.len());
        for row in &doc.map {
            let parsed = row
                .chars()
                .map(Tile::from_symbol)
                .collect::<Result<Vec<_>, _>>()?;
            if parsed.len() != width {
                return Err(MalformedLevel::RaggedRows);
            }
            tiles.push(parsed);
        }

        let mut player_start = None;
        let mut monster_starts = Vec::new();
        let mut exit = None;
        let mut fake_exits = Vec::new();
        let mut compass_pos = None;

        for (y, row) in tiles.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                let center = (x as f32 + 0.5, y as f32 + 0.5);
                match tile {
                    Tile::PlayerSpawn => player_start = Some(center),
                    Tile::MonsterSpawn(color) => {
                        monster_starts.push((center.0, center.1, color));
                    }
                    Tile::RealExit => {
                        if exit.replace((x, y)).is_some() {
                            return Err(MalformedLevel::DuplicateExit);
                        }
                    }
                    Tile::FakeExit => fake_exits.push((x, y)),
                    Tile::Compass => {
                        if compass_pos.replace(center).is_some() {
                            return Err(MalformedLevel::DuplicateCompass);
                        }
                    }
                    Tile::Wall | Tile::Empty => {}
                }
            }
        }

        Ok(Self {
            width,
            height: tiles.len(),
            tiles,
            player_start: player_start.ok_or(MalformedLevel::MissingPlayerSpawn)?,
            monster_starts,
            exit: exit.ok_or(MalformedLevel::MissingExit)?,
            fake_exits,
            compass_pos,
            compass_taken: false,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_start(&self) -> (f32, f32) {
        self.player_start
    }

    pub fn monster_starts(&self) -> &[(f32, f32, MonsterColor)] {
        &self.monster_starts
    }

    pub fn fake_exits(&self) -> &[(usize, usize)] {
        &self.fake_exits
    }

    /// Center of the real exit tile.
    pub fn exit_center(&self) -> (f32, f32) {
        (self.exit.0 as f32 + 0.5, self.exit.1 as f32 + 0.5)
    }

    /// Everything outside the grid counts as wall, so callers never need
    /// their own bounds checks.
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        let xi = x.floor() as isize;
        let yi = y.floor() as isize;
        if xi < 0 || yi < 0 || xi >= self.width as isize || yi >= self.height as isize {
            return true;
        }
        self.tiles[yi as usize][xi as usize] == Tile::Wall
    }

    pub fn reached_real_exit(&self, x: f32, y: f32) -> bool {
        (x.floor() as isize, y.floor() as isize) == (self.exit.0 as isize, self.exit.1 as isize)
    }

    pub fn reached_fake_exit(&self, x: f32, y: f32) -> bool {
        let pos = (x.floor() as isize, y.floor() as isize);
        self.fake_exits
            .iter()
            .any(|&(fx, fy)| pos == (fx as isize, fy as isize))
    }

    /// One-way flip; repeated calls after pickup are no-ops.
    pub fn check_compass_pickup(&mut self, x: f32, y: f32, radius: f32) {
        if self.compass_taken {
            return;
        }
        if let Some((cx, cy)) = self.compass_pos {
            if (x - cx).hypot(y - cy) < radius {
                self.compass_taken = true;
                info!("compass picked up");
            }
        }
    }

    /// Bearing from (x, y) to the real exit center once the compass is held.
    pub fn compass_angle(&self, x: f32, y: f32) -> Option<f32> {
        if !self.compass_taken {
            return None;
        }
        let (ex, ey) = self.exit_center();
        Some((ey - y).atan2(ex - x))
    }

    /// World position of the compass while it still sits in the maze.
    pub fn compass_sprite(&self) -> Option<(f32, f32)> {
        if self.compass_taken { None } else { self.compass_pos }
    }

    /// Centers of all non-wall tiles; the monster roam target pool.
    pub fn free_tile_centers(&self) -> Vec<(f32, f32)> {
        let mut centers = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                if tile != Tile::Wall {
                    centers.push((x as f32 + 0.5, y as f32 + 0.5));
                }
            }
        }
        centers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_from(rows: &[&str]) -> Result<Grid, MalformedLevel> {
        Grid::from_doc(&LevelDoc {
            map: rows.iter().map(|r| r.to_string()).collect(),
        })
    }

    fn basic_grid() -> Grid {
        grid_from(&["#####", "#P..#", "#.C.#", "#..E#", "#####"]).unwrap()
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let grid = basic_grid();
        assert!(grid.is_wall(-0.1, 2.5));
        assert!(grid.is_wall(2.5, -0.1));
        assert!(grid.is_wall(5.0, 2.5));
        assert!(grid.is_wall(2.5, 5.0));
        assert!(!grid.is_wall(2.5, 2.5));
    }

    proptest! {
        #[test]
        fn everywhere_outside_bounds_is_wall(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let grid = basic_grid();
            if x < 0.0 || y < 0.0 || x >= grid.width() as f32 || y >= grid.height() as f32 {
                prop_assert!(grid.is_wall(x, y));
            }
        }
    }

    #[test]
    fn load_rejects_missing_exit() {
        let err = grid_from(&["###", "#P#", "###"]).unwrap_err();
        assert!(matches!(err, MalformedLevel::MissingExit));
    }

    #[test]
    fn load_rejects_missing_player_spawn() {
        let err = grid_from(&["###", "#E#", "###"]).unwrap_err();
        assert!(matches!(err, MalformedLevel::MissingPlayerSpawn));
    }

    #[test]
    fn load_rejects_ragged_rows() {
        let err = grid_from(&["####", "#PE#", "#####"]).unwrap_err();
        assert!(matches!(err, MalformedLevel::RaggedRows));
    }

    #[test]
    fn load_rejects_unknown_symbol() {
        let err = grid_from(&["####", "#PX#", "####"]).unwrap_err();
        assert!(matches!(err, MalformedLevel::UnknownSymbol('X')));
    }

    #[test]
    fn load_rejects_second_exit() {
        let err = grid_from(&["#####", "#PEE#", "#####"]).unwrap_err();
        assert!(matches!(err, MalformedLevel::DuplicateExit));
    }

    #[test]
    fn monster_markers_map_to_colors() {
        let grid = grid_from(&["######", "#PMBG#", "#...E#", "######"]).unwrap();
        let colors: Vec<_> = grid.monster_starts().iter().map(|&(_, _, c)| c).collect();
        assert_eq!(
            colors,
            vec![MonsterColor::Red, MonsterColor::Blue, MonsterColor::Green]
        );
    }

    #[test]
    fn compass_pickup_is_idempotent() {
        let mut grid = basic_grid();
        assert!(grid.compass_angle(2.5, 2.5).is_none());

        grid.check_compass_pickup(2.5, 2.5, 0.6);
        assert!(grid.compass_angle(2.5, 2.5).is_some());
        assert!(grid.compass_sprite().is_none());

        // further checks, from anywhere, never revert the flip
        grid.check_compass_pickup(1.5, 1.5, 0.6);
        grid.check_compass_pickup(100.0, 100.0, 0.6);
        assert!(grid.compass_angle(2.5, 2.5).is_some());
    }

    #[test]
    fn compass_pickup_requires_proximity() {
        let mut grid = basic_grid();
        grid.check_compass_pickup(1.5, 1.5, 0.6);
        assert!(grid.compass_angle(1.5, 1.5).is_none());
    }

    #[test]
    fn compass_points_at_the_exit() {
        let mut grid = basic_grid();
        grid.check_compass_pickup(2.5, 2.5, 0.6);
        // exit center is (3.5, 3.5); from (2.5, 3.5) the bearing is due east
        let angle = grid.compass_angle(2.5, 3.5).unwrap();
        assert!(angle.abs() < 1e-6);
    }

    #[test]
    fn exit_membership_uses_tile_floors() {
        let grid = basic_grid();
        assert!(grid.reached_real_exit(3.1, 3.9));
        assert!(!grid.reached_real_exit(2.9, 3.9));
    }
}
