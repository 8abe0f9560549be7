//! Floor grid of room identifiers and row-major scan helpers.

use crate::types::{Direction, Pos};

use super::layout::ContractError;

/// Rectangular grid of room ids; zero marks an empty cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, ContractError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ContractError::RaggedGrid {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, pos: Pos) -> Option<u32> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Occupied neighbor cell in `direction`, if the cell exists and holds a room.
    pub fn neighbor(&self, pos: Pos, direction: Direction) -> Option<u32> {
        let (dx, dy) = direction.offset();
        self.get(Pos { y: pos.y + dy, x: pos.x + dx }).filter(|&room_id| room_id != 0)
    }

    /// Non-empty cells in row-major scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        self.cells.iter().enumerate().filter(|&(_, &room_id)| room_id != 0).map(
            move |(index, &room_id)| {
                let pos = Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 };
                (pos, room_id)
            },
        )
    }

    pub fn room_count(&self) -> usize {
        self.cells.iter().filter(|&&room_id| room_id != 0).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells.chunks(self.width).map(<[u32]>::to_vec).collect()
    }
}
