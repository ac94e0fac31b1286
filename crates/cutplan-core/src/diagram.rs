use crate::types::*;
use std::fmt::Write;

const MARGIN: f64 = 20.0;
/// Pixels per centimetre
const SCALE: f64 = 3.0;
const PANEL_SPACING: f64 = 40.0;

/// Renders every panel of the plan as a workshop cut diagram.
pub fn render_svg(plan: &ShoppingPlan) -> Result<String> {
    let mut svg = String::new();

    let panels: Vec<(&ShoppingGroup, &CutPanel)> = plan
        .groups
        .iter()
        .flat_map(|g| g.panels.iter().map(move |p| (g, p)))
        .collect();

    let max_width = panels
        .iter()
        .map(|(_, p)| p.layout.width * SCALE)
        .fold(0.0, f64::max);
    let total_height: f64 = panels
        .iter()
        .map(|(_, p)| p.layout.height * SCALE + PANEL_SPACING)
        .sum();

    let svg_width = max_width + (2.0 * MARGIN);
    let svg_height = total_height + (2.0 * MARGIN) + 20.0;

    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )?;
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##
    )?;

    let mut y_offset = MARGIN + PANEL_SPACING / 2.0;

    for (group, panel) in panels {
        let x = MARGIN;
        let panel_width = panel.layout.width * SCALE;
        let panel_height = panel.layout.height * SCALE;

        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="#333" stroke-width="2"/>"##,
            x, y_offset, panel_width, panel_height
        )?;

        writeln!(
            &mut svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="14" fill="#333">{} #{} ({:.1}% waste)</text>"##,
            x,
            y_offset - 5.0,
            escape(&group.stock_panel.name),
            panel.layout.panel_number,
            panel.stats.waste_percentage
        )?;

        for placement in &panel.layout.placements {
            let px = x + (placement.x * SCALE);
            let py = y_offset + (placement.y * SCALE);
            let pw = placement.width * SCALE;
            let ph = placement.height * SCALE;

            writeln!(
                &mut svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#4CAF50" stroke="#2E7D32" stroke-width="1" opacity="0.7"/>"##,
                px, py, pw, ph
            )?;

            let label = if placement.rotated {
                format!("{} (R)", placement.piece_name)
            } else {
                placement.piece_name.clone()
            };

            writeln!(
                &mut svg,
                r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{}</text>"##,
                px + pw / 2.0,
                py + ph / 2.0 + 3.0,
                escape(&label)
            )?;
        }

        y_offset += panel_height + PANEL_SPACING;
    }

    writeln!(
        &mut svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">Panels: {} | Waste: {:.1}% | Efficiency: {:.1}%</text>"##,
        MARGIN,
        svg_height - MARGIN,
        plan.total_panels,
        plan.waste_percentage(),
        plan.overall_efficiency * 100.0
    )?;

    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
