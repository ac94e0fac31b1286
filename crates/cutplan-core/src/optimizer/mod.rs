use crate::types::*;
use std::cmp::Ordering;
use tracing::debug;

pub mod geometry;
mod placement;
mod summary;

pub use placement::Position;
pub(crate) use summary::mean;

/// Packs pieces onto sheets of one stock size using first-fit decreasing
/// across panels and corner-point best fit within a panel.
pub struct Optimizer {
    stock: StockPanel,
}

/// Result of packing one set of pieces
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    /// Panels in the order they were opened
    pub panels: Vec<CutPanel>,
    /// Pieces with units too large for an empty stock panel
    pub unplaced: Vec<PlanIssue>,
}

impl Optimizer {
    /// Validates the stock panel and builds a new optimizer instance.
    pub fn new(stock: StockPanel) -> Result<Self> {
        if stock.width_cm <= 0.0 || stock.height_cm <= 0.0 {
            return Err(PlannerError::InvalidStockPanel(stock.name));
        }

        Ok(Self { stock })
    }

    pub fn stock(&self) -> &StockPanel {
        &self.stock
    }

    /// Packs every unit of every piece and computes per-panel usage.
    pub fn optimize<'a>(&self, pieces: impl IntoIterator<Item = &'a RequiredPiece>) -> Packing {
        let mut units = self.expand_pieces(pieces);
        // Stable, so equal areas keep input order.
        units.sort_by(|a, b| b.area().partial_cmp(&a.area()).unwrap_or(Ordering::Equal));

        let (layouts, unplaced) = self.first_fit_decreasing(&units);

        Packing {
            panels: layouts.into_iter().map(CutPanel::from).collect(),
            unplaced,
        }
    }

    /// One entry per unit according to the requested quantity.
    fn expand_pieces<'a>(
        &self,
        pieces: impl IntoIterator<Item = &'a RequiredPiece>,
    ) -> Vec<&'a RequiredPiece> {
        pieces
            .into_iter()
            .flat_map(|piece| std::iter::repeat(piece).take(piece.quantity as usize))
            .collect()
    }

    /// Places each unit on the first existing panel that accepts it, opening
    /// a new panel otherwise. Units that do not fit an empty panel are
    /// collected per piece.
    fn first_fit_decreasing(
        &self,
        units: &[&RequiredPiece],
    ) -> (Vec<PanelLayout>, Vec<PlanIssue>) {
        let mut layouts: Vec<PanelLayout> = Vec::new();
        let mut unplaced: Vec<PlanIssue> = Vec::new();

        for &piece in units {
            if layouts
                .iter_mut()
                .any(|layout| layout.try_place(piece).is_some())
            {
                continue;
            }

            let mut fresh = PanelLayout::new(layouts.len() as u32 + 1, &self.stock);
            if fresh.try_place(piece).is_some() {
                debug!(
                    "Opened panel #{} of {} for '{}'",
                    fresh.panel_number, self.stock.name, piece.id
                );
                layouts.push(fresh);
            } else {
                self.record_unplaced(&mut unplaced, piece);
            }
        }

        (layouts, unplaced)
    }

    /// Counts an unplaceable unit against its piece's existing issue, if any.
    fn record_unplaced(&self, unplaced: &mut Vec<PlanIssue>, piece: &RequiredPiece) {
        for issue in unplaced.iter_mut() {
            if let PlanIssue::UnplaceablePiece {
                piece_id, quantity, ..
            } = issue
            {
                if *piece_id == piece.id {
                    *quantity += 1;
                    return;
                }
            }
        }

        unplaced.push(PlanIssue::UnplaceablePiece {
            piece_id: piece.id.clone(),
            piece_name: piece.name.clone(),
            width_cm: piece.width_cm,
            height_cm: piece.height_cm,
            thickness_mm: piece.thickness_mm,
            quantity: 1,
            stock_width_cm: self.stock.width_cm,
            stock_height_cm: self.stock.height_cm,
        });
    }
}
