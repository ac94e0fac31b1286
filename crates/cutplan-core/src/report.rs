use crate::types::*;

/// Purchase checklist: one line per stock panel size to buy.
pub fn purchase_list(plan: &ShoppingPlan) -> Vec<PurchaseLine> {
    plan.groups
        .iter()
        .map(|group| {
            let panel = &group.stock_panel;
            PurchaseLine {
                panel_name: panel.name.clone(),
                panel_size: panel.size_label(),
                thickness_mm: panel.thickness_mm,
                material: panel.material,
                quantity: group.quantity(),
                total_area_sqm: panel.area() * group.quantity() as f64 / 10_000.0,
            }
        })
        .collect()
}

impl CutPanel {
    /// Placements grouped by piece id in first-placed order. Size is the
    /// piece's own size; position and rotation are those of the first unit.
    pub fn cut_list(&self) -> Vec<CutListEntry> {
        let mut entries: Vec<CutListEntry> = Vec::new();

        for placement in &self.layout.placements {
            if let Some(entry) = entries
                .iter_mut()
                .find(|e| e.piece_id == placement.piece_id)
            {
                entry.quantity += 1;
                continue;
            }

            let (width_cm, height_cm) = if placement.rotated {
                (placement.height, placement.width)
            } else {
                (placement.width, placement.height)
            };

            entries.push(CutListEntry {
                piece_id: placement.piece_id.clone(),
                piece_name: placement.piece_name.clone(),
                width_cm,
                height_cm,
                quantity: 1,
                x: placement.x,
                y: placement.y,
                rotated: placement.rotated,
            });
        }

        entries
    }
}

impl RequiredPiece {
    /// Edge banding length in metres for all units: the full perimeter for
    /// four sides, width plus height for two, the width for one.
    pub fn edge_band_meters(&self) -> f64 {
        let per_piece = match self.edge_band_sides {
            Some(4) => (self.width_cm + self.height_cm) * 2.0 / 100.0,
            Some(2) => (self.width_cm + self.height_cm) / 100.0,
            Some(1) => self.width_cm / 100.0,
            _ => 0.0,
        };
        per_piece * self.quantity as f64
    }
}

/// Total edge banding for a piece list, in metres.
pub fn edge_band_meters(pieces: &[RequiredPiece]) -> f64 {
    pieces.iter().map(RequiredPiece::edge_band_meters).sum()
}
