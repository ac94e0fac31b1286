use crate::types::{Material, StockPanel};

/// Resolves the stock sheet to buy for a material and thickness.
pub trait StockLookup {
    fn find_best_stock_panel(&self, material: Material, thickness_mm: u32) -> Option<StockPanel>;
}

impl<F> StockLookup for F
where
    F: Fn(Material, u32) -> Option<StockPanel>,
{
    fn find_best_stock_panel(&self, material: Material, thickness_mm: u32) -> Option<StockPanel> {
        self(material, thickness_mm)
    }
}

/// Table of purchasable stock sheets
#[derive(Debug, Clone, PartialEq)]
pub struct StockCatalog {
    panels: Vec<StockPanel>,
}

impl StockCatalog {
    pub fn new(panels: Vec<StockPanel>) -> Self {
        Self { panels }
    }

    pub fn panels(&self) -> &[StockPanel] {
        &self.panels
    }

    /// Every sheet stocked in the given material and thickness, in catalog order.
    pub fn panels_for(
        &self,
        material: Material,
        thickness_mm: u32,
    ) -> impl Iterator<Item = &StockPanel> {
        self.panels
            .iter()
            .filter(move |p| p.material == material && p.thickness_mm == thickness_mm)
    }

    /// First matching sheet. The table lists the common full-size sheet first.
    pub fn find_best(&self, material: Material, thickness_mm: u32) -> Option<&StockPanel> {
        self.panels_for(material, thickness_mm).next()
    }
}

impl StockLookup for StockCatalog {
    fn find_best_stock_panel(&self, material: Material, thickness_mm: u32) -> Option<StockPanel> {
        self.find_best(material, thickness_mm).cloned()
    }
}

impl Default for StockCatalog {
    /// Standard 8x4 ft sheets plus the smaller MDF cuts. No solid wood sheets.
    fn default() -> Self {
        let sheet = |width_cm: f64, height_cm: f64, thickness_mm: u32, material, name: &str| {
            StockPanel {
                width_cm,
                height_cm,
                thickness_mm,
                material,
                name: name.to_string(),
            }
        };

        Self::new(vec![
            sheet(244.0, 122.0, 18, Material::Mdf, "MDF 18mm standard (244x122)"),
            sheet(244.0, 122.0, 25, Material::Mdf, "MDF 25mm standard (244x122)"),
            sheet(244.0, 122.0, 16, Material::Mdf, "MDF 16mm standard (244x122)"),
            sheet(244.0, 122.0, 18, Material::Plywood, "Plywood 18mm standard (244x122)"),
            sheet(244.0, 122.0, 25, Material::Plywood, "Plywood 25mm standard (244x122)"),
            sheet(183.0, 122.0, 18, Material::Mdf, "MDF 18mm small (183x122)"),
            sheet(122.0, 122.0, 18, Material::Mdf, "MDF 18mm square (122x122)"),
        ])
    }
}
