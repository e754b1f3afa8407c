//! Tile grid storage and auto-tiling
//!
//! A fixed-size, row-major grid of `TileId`. The grid is sized once when the
//! game starts; level generation rewrites cells in place but never resizes.

use super::tile::TileId;

/// Which of the 9 visual variants a solid tile should use.
///
/// The discriminant is the index into a 3x3 block of the tile sheet:
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutotileDir {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Left = 3,
    Center = 4,
    Right = 5,
    BottomLeft = 6,
    Bottom = 7,
    BottomRight = 8,
}

impl AutotileDir {
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Column within the 3x3 block
    pub fn column(self) -> u32 {
        self.index() % 3
    }

    /// Row within the 3x3 block
    pub fn row(self) -> u32 {
        self.index() / 3
    }

    /// Classify a tile from the occupancy of its four neighbors.
    ///
    /// Corners are tested before edges, so a tile open both above and to the
    /// left is always `TopLeft`, never `Top` or `Left`.
    pub fn from_neighbors(up: bool, down: bool, left: bool, right: bool) -> Self {
        if !up && !left {
            return AutotileDir::TopLeft;
        }
        if !up && !right {
            return AutotileDir::TopRight;
        }
        if !down && !left {
            return AutotileDir::BottomLeft;
        }
        if !down && !right {
            return AutotileDir::BottomRight;
        }

        if !up {
            return AutotileDir::Top;
        }
        if !down {
            return AutotileDir::Bottom;
        }
        if !left {
            return AutotileDir::Left;
        }
        if !right {
            return AutotileDir::Right;
        }

        AutotileDir::Center
    }
}

/// Row-major tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
}

impl Tilemap {
    /// Create an empty (all `None`) map
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileId::None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Tile at grid coordinates, `TileId::None` outside the map
    pub fn tile_at(&self, x: i32, y: i32) -> TileId {
        self.get(x, y).unwrap_or(TileId::None)
    }

    /// Tile at grid coordinates, `None` outside the map
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Overwrite a cell. Returns false (and does nothing) outside the map.
    pub fn set(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to `tile`
    #[cfg(test)]
    pub fn fill(&mut self, tile: TileId) {
        self.tiles.fill(tile);
    }

    /// Topmost row in column `x` holding `tile`, scanning downward from row 0
    pub fn first_in_column(&self, x: i32, tile: TileId) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.tile_at(x, y) == tile)
    }

    /// Visual variant for the tile at (x, y), based on its cardinal neighbors.
    /// Anything outside the map counts as empty.
    pub fn autotile_direction(&self, x: i32, y: i32) -> AutotileDir {
        let up = self.tile_at(x, y - 1).is_solid();
        let down = self.tile_at(x, y + 1).is_solid();
        let left = self.tile_at(x - 1, y).is_solid();
        let right = self.tile_at(x + 1, y).is_solid();

        AutotileDir::from_neighbors(up, down, left, right)
    }

    /// Iterate all cells as (x, y, tile) in row-major order
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, TileId)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| ((i % width) as i32, (i / width) as i32, t))
    }
}
