//! Cut planning for sheet-material furniture jobs: packs the pieces of a job
//! onto standard stock panels and reports what to buy and how to cut it.

pub mod catalog;
pub mod cost;
pub mod diagram;
pub mod optimizer;
pub mod report;
pub mod shopping;
pub mod types;

pub use catalog::{StockCatalog, StockLookup};
pub use diagram::render_svg;
pub use optimizer::{Optimizer, Packing};
pub use report::purchase_list;
pub use shopping::ShoppingListBuilder;
pub use types::*;

impl PlanRequest {
    /// Rejects pieces and stock panels the optimizer cannot work with.
    pub fn validate(&self) -> Result<()> {
        for piece in &self.pieces {
            if piece.width_cm <= 0.0 || piece.height_cm <= 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "Piece '{}' must have a positive width and height",
                    piece.id
                )));
            }
            if piece.quantity == 0 {
                return Err(PlannerError::InvalidInput(format!(
                    "Piece '{}' has a quantity of zero",
                    piece.id
                )));
            }
        }

        if let Some(price) = self.price_per_sqm {
            if price < 0.0 {
                return Err(PlannerError::InvalidInput(
                    "Price per square metre cannot be negative".to_string(),
                ));
            }
        }

        if let Some(panels) = &self.stock_panels {
            if let Some(panel) = panels
                .iter()
                .find(|p| p.width_cm <= 0.0 || p.height_cm <= 0.0)
            {
                return Err(PlannerError::InvalidStockPanel(panel.name.clone()));
            }
        }

        Ok(())
    }
}

/// Validates a request and plans it against its own stock panels, or the
/// built-in catalog when it brings none.
pub fn plan_job(request: &PlanRequest) -> Result<JobPlan> {
    request.validate()?;

    let catalog = match &request.stock_panels {
        Some(panels) => StockCatalog::new(panels.clone()),
        None => StockCatalog::default(),
    };

    let plan = ShoppingListBuilder::new(&catalog, request.material).build(&request.pieces)?;
    let purchase_list = purchase_list(&plan);
    let estimate = request
        .price_per_sqm
        .map(|price| MaterialEstimate::for_plan(&plan, price));

    Ok(JobPlan {
        plan,
        purchase_list,
        estimate,
    })
}
