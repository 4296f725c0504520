use crate::error::SweepError;

/// Element type of the measurement buffer.
pub type Cell = u32;

/// Width of one buffer cell in bytes. Must divide 1 KiB exactly so every
/// power-of-two window maps to a power-of-two cell count.
pub const CELL_BYTES: usize = size_of::<Cell>();

/// The single contiguous allocation every schedule entry reads from.
///
/// The hot loop mutates cells as a side effect of reading them; nothing here
/// depends on cell values staying intact across trials. The buffer is never
/// resized or reallocated; only the index range touched by a trial changes.
pub struct WorkingSet {
    cells: Vec<Cell>,
}

impl WorkingSet {
    /// Allocates `total_bytes / CELL_BYTES` cells exactly once and fills them
    /// with `filler`. The fill happens before any timing starts.
    pub fn allocate(total_bytes: usize, filler: Cell) -> Result<Self, SweepError> {
        let len = total_bytes / CELL_BYTES;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, filler);
        Ok(WorkingSet { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_and_fills_every_cell() {
        let ws = WorkingSet::allocate(64 * 1024, 7).unwrap();
        assert_eq!(ws.len(), 64 * 1024 / CELL_BYTES);
        assert!(ws.cells.iter().all(|&c| c == 7));
    }
}
