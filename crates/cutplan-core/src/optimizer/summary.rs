use super::*;

impl PanelStats {
    /// Computes utilization and waste for a finished layout.
    pub fn for_layout(layout: &PanelLayout) -> Self {
        let total_area = layout.width * layout.height;
        let used_area: f64 = layout.placements.iter().map(|p| p.width * p.height).sum();
        let waste_area = total_area - used_area;
        let (waste_percentage, efficiency) = if total_area > 0.0 {
            ((waste_area / total_area) * 100.0, used_area / total_area)
        } else {
            (0.0, 0.0)
        };

        Self {
            used_area,
            waste_area,
            waste_percentage,
            efficiency,
        }
    }
}

impl From<PanelLayout> for CutPanel {
    fn from(layout: PanelLayout) -> Self {
        let stats = PanelStats::for_layout(&layout);
        Self { layout, stats }
    }
}

impl Packing {
    pub fn total_area(&self) -> f64 {
        self.panels
            .iter()
            .map(|p| p.layout.width * p.layout.height)
            .sum()
    }

    pub fn total_waste_area(&self) -> f64 {
        self.panels.iter().map(|p| p.stats.waste_area).sum()
    }

    /// Group waste over group panel area, in percent.
    pub fn waste_percentage(&self) -> f64 {
        let total_area = self.total_area();
        if total_area > 0.0 {
            (self.total_waste_area() / total_area) * 100.0
        } else {
            0.0
        }
    }

    /// Arithmetic mean of the per-panel efficiencies, not area weighted.
    pub fn average_efficiency(&self) -> f64 {
        mean(self.panels.iter().map(|p| p.stats.efficiency))
    }
}

/// Mean of the values, zero when there are none.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}
