use serde::{Deserialize, Serialize};
use std::fmt;

/// Sheet material a job is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Mdf,
    Plywood,
    Solid,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Mdf => "mdf",
            Material::Plywood => "plywood",
            Material::Solid => "solid",
        };
        f.write_str(name)
    }
}

/// Piece to be cut, as produced by the job calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredPiece {
    pub id: String,
    pub name: String,
    pub width_cm: f64,
    pub height_cm: f64,
    pub thickness_mm: u32,
    pub quantity: u32,
    /// Number of sides that get edge banding (1, 2 or 4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_band_sides: Option<u8>,
}

impl RequiredPiece {
    pub fn area(&self) -> f64 {
        self.width_cm * self.height_cm
    }
}

/// Standard sheet that can be purchased
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPanel {
    pub width_cm: f64,
    pub height_cm: f64,
    pub thickness_mm: u32,
    pub material: Material,
    pub name: String,
}

impl StockPanel {
    pub fn area(&self) -> f64 {
        self.width_cm * self.height_cm
    }

    /// Human readable size, e.g. `244x122 cm`.
    pub fn size_label(&self) -> String {
        format!("{}x{} cm", self.width_cm, self.height_cm)
    }
}

/// Placement of one unit of a piece on a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub piece_id: String,
    pub piece_name: String,
    pub x: f64,
    pub y: f64,
    /// Effective width on the panel (the piece height when rotated)
    pub width: f64,
    /// Effective height on the panel (the piece width when rotated)
    pub height: f64,
    pub rotated: bool,
}

/// A single stock sheet while it is being filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub panel_number: u32,
    pub width: f64,
    pub height: f64,
    /// Placements in the order they were made
    pub placements: Vec<Placement>,
}

/// Material usage of one finished panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelStats {
    pub used_area: f64,
    pub waste_area: f64,
    pub waste_percentage: f64,
    /// Used area over panel area, in `[0, 1]`
    pub efficiency: f64,
}

/// A finished panel: its layout plus usage statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPanel {
    #[serde(flatten)]
    pub layout: PanelLayout,
    #[serde(flatten)]
    pub stats: PanelStats,
}

/// All panels needed for one thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingGroup {
    pub thickness_mm: u32,
    pub stock_panel: StockPanel,
    pub panels: Vec<CutPanel>,
    pub total_waste_area: f64,
    pub waste_percentage: f64,
    /// Unweighted mean of the per-panel efficiencies
    pub average_efficiency: f64,
}

impl ShoppingGroup {
    /// Number of stock panels to buy for this group.
    pub fn quantity(&self) -> u32 {
        self.panels.len() as u32
    }
}

/// Output: the purchase plan for a whole job
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShoppingPlan {
    pub groups: Vec<ShoppingGroup>,
    pub total_panels: u32,
    pub total_waste_area: f64,
    /// Unweighted mean of the group average efficiencies
    pub overall_efficiency: f64,
    /// Problems that kept part of the job out of the plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<PlanIssue>,
}

impl ShoppingPlan {
    /// True when every piece of the job made it onto a panel.
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn total_panel_area(&self) -> f64 {
        self.groups
            .iter()
            .map(|g| g.stock_panel.area() * g.quantity() as f64)
            .sum()
    }

    /// Waste over the area of every purchased panel, in percent.
    pub fn waste_percentage(&self) -> f64 {
        let total_area = self.total_panel_area();
        if total_area > 0.0 {
            (self.total_waste_area / total_area) * 100.0
        } else {
            0.0
        }
    }
}

/// Part of a job that could not be planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanIssue {
    #[error(
        "No {material} stock panel of {thickness_mm}mm in the catalog, {} piece(s) skipped",
        .piece_ids.len()
    )]
    MissingStockPanel {
        material: Material,
        thickness_mm: u32,
        piece_ids: Vec<String>,
    },

    #[error(
        "Piece '{piece_id}' ({width_cm}x{height_cm} cm, {quantity} unit(s)) does not fit on a {stock_width_cm}x{stock_height_cm} cm stock panel"
    )]
    UnplaceablePiece {
        piece_id: String,
        piece_name: String,
        width_cm: f64,
        height_cm: f64,
        thickness_mm: u32,
        /// Units of the piece left unplaced
        quantity: u32,
        stock_width_cm: f64,
        stock_height_cm: f64,
    },
}

/// Input: a job's pieces and how to source them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub material: Material,
    pub pieces: Vec<RequiredPiece>,
    /// Replaces the built-in stock catalog when present
    #[serde(default)]
    pub stock_panels: Option<Vec<StockPanel>>,
    /// Price of one square metre of sheet material
    #[serde(default)]
    pub price_per_sqm: Option<f64>,
}

/// One line of the purchase checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub panel_name: String,
    pub panel_size: String,
    pub thickness_mm: u32,
    pub material: Material,
    pub quantity: u32,
    pub total_area_sqm: f64,
}

/// Pieces of one id on a panel, as listed on the workshop sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutListEntry {
    pub piece_id: String,
    pub piece_name: String,
    pub width_cm: f64,
    pub height_cm: f64,
    pub quantity: u32,
    /// Position of the first unit placed
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// Sheet material cost of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialEstimate {
    pub price_per_sqm: f64,
    pub panels_cost: f64,
    pub waste_cost: f64,
}

/// Output of [`crate::plan_job`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPlan {
    pub plan: ShoppingPlan,
    pub purchase_list: Vec<PurchaseLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<MaterialEstimate>,
}

/// Error type for planning
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Stock panel '{0}' has a non-positive size")]
    InvalidStockPanel(String),

    #[error("Failed to render cut diagram")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
