use super::geometry::{candidate_positions, fits, overlaps, Rect};
use crate::types::{PanelLayout, Placement, RequiredPiece, StockPanel};

/// Chosen spot for a piece on a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
    /// Uncovered area right of and below the piece; lower is better
    pub waste: f64,
}

impl PanelLayout {
    /// Creates an empty sheet with the stock panel's dimensions.
    pub fn new(panel_number: u32, stock: &StockPanel) -> Self {
        Self {
            panel_number,
            width: stock.width_cm,
            height: stock.height_cm,
            placements: Vec::new(),
        }
    }

    /// Places one unit of `piece` at its best position. Leaves the panel
    /// untouched and returns `None` when no position accepts it.
    pub fn try_place(&mut self, piece: &RequiredPiece) -> Option<&Placement> {
        let position = self.find_best_position(piece)?;
        let (width, height) = if position.rotated {
            (piece.height_cm, piece.width_cm)
        } else {
            (piece.width_cm, piece.height_cm)
        };

        self.placements.push(Placement {
            piece_id: piece.id.clone(),
            piece_name: piece.name.clone(),
            x: position.x,
            y: position.y,
            width,
            height,
            rotated: position.rotated,
        });
        self.placements.last()
    }

    /// Best position over both orientations. On equal waste the natural
    /// orientation wins, so square pieces are never tried rotated.
    pub fn find_best_position(&self, piece: &RequiredPiece) -> Option<Position> {
        let candidates = candidate_positions(self);
        let natural =
            self.best_position_for_size(&candidates, piece.width_cm, piece.height_cm, false);
        let rotated = if piece.width_cm != piece.height_cm {
            self.best_position_for_size(&candidates, piece.height_cm, piece.width_cm, true)
        } else {
            None
        };

        match (natural, rotated) {
            (Some(n), Some(r)) if r.waste < n.waste => Some(r),
            (Some(n), _) => Some(n),
            (None, r) => r,
        }
    }

    /// Lowest-waste free candidate for a fixed orientation. Earlier candidates win ties.
    fn best_position_for_size(
        &self,
        candidates: &[(f64, f64)],
        width: f64,
        height: f64,
        rotated: bool,
    ) -> Option<Position> {
        let mut best: Option<Position> = None;

        for &(x, y) in candidates {
            if !fits(self, x + width, y + height) {
                continue;
            }

            let rect = Rect::new(x, y, width, height);
            if self
                .placements
                .iter()
                .any(|p| overlaps(&rect, &Rect::from(p)))
            {
                continue;
            }

            let waste = self.waste_score(&rect);
            match best {
                Some(current) if current.waste <= waste => {}
                _ => {
                    best = Some(Position {
                        x,
                        y,
                        rotated,
                        waste,
                    })
                }
            }
        }

        best
    }

    /// Strip to the right of the piece plus the strip below it. A local
    /// fragmentation estimate, not the exact remaining free area.
    fn waste_score(&self, rect: &Rect) -> f64 {
        (self.width - rect.right()) * rect.height + rect.width * (self.height - rect.bottom())
    }
}
