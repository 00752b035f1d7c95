use anyhow::{Result, ensure};

use crate::entities::{Defect, DefectCounts};

/// The strip ("dough") on which items are placed, together with the defects it carries.
/// Defects are kept sorted by position.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub length: usize,
    defects: Vec<Defect>,
}

impl Board {
    pub fn new(length: usize, defects: impl IntoIterator<Item = Defect>) -> Result<Self> {
        ensure!(length > 0, "board length must be positive");
        let mut board = Board {
            length,
            defects: vec![],
        };
        for defect in defects {
            board.add_defect(defect)?;
        }
        Ok(board)
    }

    /// Registers a defect. Positions outside `[0, length)` are rejected.
    pub fn add_defect(&mut self, defect: Defect) -> Result<()> {
        ensure!(
            (0.0..self.length as f32).contains(&defect.position),
            "defect position {} out of board range [0, {})",
            defect.position,
            self.length
        );
        let idx = self
            .defects
            .partition_point(|d| d.position <= defect.position);
        self.defects.insert(idx, defect);
        Ok(())
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Counts the defects per class with a position in `[start, start + length)`.
    pub fn count_defects(&self, start: usize, length: usize) -> DefectCounts {
        let (start, end) = (start as f32, (start + length) as f32);
        let first = self.defects.partition_point(|d| d.position < start);
        let mut counts = DefectCounts::zero();
        self.defects[first..]
            .iter()
            .take_while(|d| d.position < end)
            .for_each(|d| counts.increment(d.class));
        counts
    }
}
