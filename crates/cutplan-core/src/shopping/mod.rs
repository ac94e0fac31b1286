use crate::catalog::StockLookup;
use crate::optimizer::{mean, Optimizer};
use crate::types::*;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Builds the purchase plan for a job: one group per thickness, each packed
/// onto the stock panel the catalog offers for it.
pub struct ShoppingListBuilder<'a, L: ?Sized> {
    catalog: &'a L,
    material: Material,
}

impl<'a, L: StockLookup + ?Sized> ShoppingListBuilder<'a, L> {
    pub fn new(catalog: &'a L, material: Material) -> Self {
        Self { catalog, material }
    }

    /// Groups without a stock panel and pieces that fit no panel are left
    /// out of the groups and listed in `issues`; everything else is planned.
    pub fn build(&self, pieces: &[RequiredPiece]) -> Result<ShoppingPlan> {
        let mut plan = ShoppingPlan::default();

        for (thickness_mm, group) in group_by_thickness(pieces) {
            let Some(stock) = self
                .catalog
                .find_best_stock_panel(self.material, thickness_mm)
            else {
                let issue = PlanIssue::MissingStockPanel {
                    material: self.material,
                    thickness_mm,
                    piece_ids: group.iter().map(|p| p.id.clone()).collect(),
                };
                warn!("{issue}");
                plan.issues.push(issue);
                continue;
            };

            debug!(
                "Packing {} piece(s) of {}mm onto '{}'",
                group.len(),
                thickness_mm,
                stock.name
            );

            let optimizer = Optimizer::new(stock)?;
            let packing = optimizer.optimize(group.iter().copied());

            for issue in &packing.unplaced {
                warn!("{issue}");
            }
            plan.issues.extend(packing.unplaced.iter().cloned());

            if packing.panels.is_empty() {
                continue;
            }

            let shopping_group = ShoppingGroup {
                thickness_mm,
                stock_panel: optimizer.stock().clone(),
                total_waste_area: packing.total_waste_area(),
                waste_percentage: packing.waste_percentage(),
                average_efficiency: packing.average_efficiency(),
                panels: packing.panels,
            };

            plan.total_panels += shopping_group.quantity();
            plan.total_waste_area += shopping_group.total_waste_area;
            plan.groups.push(shopping_group);
        }

        plan.overall_efficiency = mean(plan.groups.iter().map(|g| g.average_efficiency));

        info!(
            "Shopping plan: {} panel(s) in {} group(s), {:.1}% waste, {} issue(s)",
            plan.total_panels,
            plan.groups.len(),
            plan.waste_percentage(),
            plan.issues.len()
        );

        Ok(plan)
    }
}

/// Splits pieces by thickness, keeping first-seen order of thicknesses and
/// input order within each group.
pub fn group_by_thickness(pieces: &[RequiredPiece]) -> Vec<(u32, Vec<&RequiredPiece>)> {
    let mut groups: Vec<(u32, Vec<&RequiredPiece>)> = Vec::new();

    for piece in pieces {
        match groups.iter_mut().find(|(t, _)| *t == piece.thickness_mm) {
            Some((_, group)) => group.push(piece),
            None => groups.push((piece.thickness_mm, vec![piece])),
        }
    }

    groups
}
