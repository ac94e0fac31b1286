use crate::types::*;

/// Price of every panel in the plan: panel area in m² times quantity times
/// the price per m².
pub fn panel_cost(plan: &ShoppingPlan, price_per_sqm: f64) -> f64 {
    plan.groups
        .iter()
        .map(|g| g.stock_panel.area() / 10_000.0 * g.quantity() as f64 * price_per_sqm)
        .sum()
}

/// Share of the raw material cost that ends up as offcuts.
pub fn waste_cost(raw_material_cost: f64, waste_percentage: f64) -> f64 {
    raw_material_cost * waste_percentage / 100.0
}

impl MaterialEstimate {
    pub fn for_plan(plan: &ShoppingPlan, price_per_sqm: f64) -> Self {
        let panels_cost = panel_cost(plan, price_per_sqm);
        Self {
            price_per_sqm,
            panels_cost,
            waste_cost: waste_cost(panels_cost, plan.waste_percentage()),
        }
    }
}
