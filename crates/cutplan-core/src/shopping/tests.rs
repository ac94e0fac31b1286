use super::*;
use crate::catalog::StockCatalog;
use float_cmp::approx_eq;

fn piece(
    id: &str,
    width_cm: f64,
    height_cm: f64,
    thickness_mm: u32,
    quantity: u32,
) -> RequiredPiece {
    RequiredPiece {
        id: id.to_string(),
        name: id.to_string(),
        width_cm,
        height_cm,
        thickness_mm,
        quantity,
        edge_band_sides: None,
    }
}

fn build(pieces: &[RequiredPiece], material: Material) -> ShoppingPlan {
    let catalog = StockCatalog::default();
    ShoppingListBuilder::new(&catalog, material)
        .build(pieces)
        .unwrap()
}

#[test]
fn test_group_by_thickness_keeps_first_seen_order() {
    let pieces = vec![
        piece("back", 116.0, 73.0, 12, 1),
        piece("top", 120.0, 60.0, 18, 1),
        piece("drawer_bottom", 36.0, 53.0, 12, 2),
        piece("leg", 60.0, 72.0, 18, 2),
    ];

    let groups = group_by_thickness(&pieces);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, 12);
    assert_eq!(groups[1].0, 18);
    let ids: Vec<&str> = groups[0].1.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["back", "drawer_bottom"]);
}

#[test]
fn test_two_thickness_groups() {
    let pieces = vec![
        piece("top", 140.0, 70.0, 25, 1),
        piece("side", 200.0, 100.0, 18, 2),
        piece("shelf", 60.0, 30.0, 18, 1),
    ];

    let plan = build(&pieces, Material::Mdf);

    assert!(plan.is_complete());
    assert_eq!(plan.groups.len(), 2);
    assert_eq!(plan.groups[0].thickness_mm, 25);
    assert_eq!(plan.groups[0].stock_panel.thickness_mm, 25);
    assert_eq!(plan.groups[0].quantity(), 1);
    assert_eq!(plan.groups[1].thickness_mm, 18);
    assert_eq!(plan.groups[1].stock_panel.thickness_mm, 18);
    assert_eq!(plan.groups[1].quantity(), 2);
    assert_eq!(plan.total_panels, 3);

    let expected = (plan.groups[0].average_efficiency + plan.groups[1].average_efficiency) / 2.0;
    assert!(approx_eq!(f64, plan.overall_efficiency, expected, epsilon = 1e-12));

    let waste: f64 = plan.groups.iter().map(|g| g.total_waste_area).sum();
    assert!(approx_eq!(f64, plan.total_waste_area, waste, epsilon = 1e-9));
}

#[test]
fn test_group_efficiency_is_unweighted() {
    // One full panel and one nearly empty panel
    let pieces = vec![
        piece("top", 244.0, 122.0, 18, 1),
        piece("cleat", 24.4, 12.2, 18, 1),
    ];

    let plan = build(&pieces, Material::Mdf);
    let group = &plan.groups[0];

    assert_eq!(group.quantity(), 2);
    assert!(approx_eq!(f64, group.average_efficiency, 0.505, epsilon = 1e-9));
    assert!(approx_eq!(f64, group.waste_percentage, 49.5, epsilon = 1e-9));
}

#[test]
fn test_missing_stock_panel_skips_only_that_group() {
    let pieces = vec![
        piece("top", 120.0, 60.0, 18, 1),
        piece("back", 116.0, 73.0, 12, 1),
        piece("drawer_bottom", 36.0, 53.0, 12, 2),
    ];

    let plan = build(&pieces, Material::Mdf);

    assert!(!plan.is_complete());
    assert_eq!(plan.groups.len(), 1);
    assert_eq!(plan.groups[0].thickness_mm, 18);
    assert_eq!(plan.total_panels, 1);
    assert_eq!(
        plan.issues,
        vec![PlanIssue::MissingStockPanel {
            material: Material::Mdf,
            thickness_mm: 12,
            piece_ids: vec!["back".to_string(), "drawer_bottom".to_string()],
        }]
    );
}

#[test]
fn test_material_without_catalog_entries() {
    let pieces = vec![piece("top", 120.0, 60.0, 18, 1)];

    let plan = build(&pieces, Material::Solid);

    assert!(plan.groups.is_empty());
    assert_eq!(plan.total_panels, 0);
    assert_eq!(plan.overall_efficiency, 0.0);
    assert_eq!(plan.issues.len(), 1);
}

#[test]
fn test_unplaceable_piece_reported_alongside_plan() {
    let pieces = vec![
        piece("beam", 300.0, 50.0, 18, 1),
        piece("shelf", 60.0, 30.0, 18, 2),
    ];

    let plan = build(&pieces, Material::Plywood);

    assert_eq!(plan.total_panels, 1);
    assert_eq!(plan.groups[0].panels[0].layout.placements.len(), 2);
    assert_eq!(plan.issues.len(), 1);
    assert!(matches!(
        &plan.issues[0],
        PlanIssue::UnplaceablePiece { piece_id, quantity: 1, .. } if piece_id == "beam"
    ));
}

#[test]
fn test_group_with_only_unplaceable_pieces_is_not_purchased() {
    let pieces = vec![
        piece("beam", 300.0, 130.0, 25, 1),
        piece("shelf", 60.0, 30.0, 18, 1),
    ];

    let plan = build(&pieces, Material::Mdf);

    assert_eq!(plan.groups.len(), 1);
    assert_eq!(plan.groups[0].thickness_mm, 18);
    assert!(approx_eq!(
        f64,
        plan.overall_efficiency,
        plan.groups[0].average_efficiency,
        epsilon = 1e-12
    ));
    assert_eq!(plan.issues.len(), 1);
}

#[test]
fn test_empty_job() {
    let plan = build(&[], Material::Mdf);

    assert_eq!(plan, ShoppingPlan::default());
    assert_eq!(plan.total_panels, 0);
    assert_eq!(plan.total_waste_area, 0.0);
    assert!(plan.is_complete());
}

#[test]
fn test_closure_catalog() {
    let offcut = |material: Material, thickness_mm: u32| {
        Some(StockPanel {
            width_cm: 100.0,
            height_cm: 50.0,
            thickness_mm,
            material,
            name: format!("Offcut {thickness_mm}mm"),
        })
    };
    // Four 40x25 pieces fit an offcut, the fifth needs a second one
    let pieces = vec![piece("slat", 40.0, 25.0, 18, 5)];

    let plan = ShoppingListBuilder::new(&offcut, Material::Solid)
        .build(&pieces)
        .unwrap();

    assert_eq!(plan.groups[0].stock_panel.name, "Offcut 18mm");
    assert_eq!(plan.total_panels, 2);
}

#[test]
fn test_invalid_catalog_entry_is_an_error() {
    let broken = StockCatalog::new(vec![StockPanel {
        width_cm: 0.0,
        height_cm: 122.0,
        thickness_mm: 18,
        material: Material::Mdf,
        name: "broken".to_string(),
    }]);
    let pieces = vec![piece("shelf", 60.0, 30.0, 18, 1)];

    let result = ShoppingListBuilder::new(&broken, Material::Mdf).build(&pieces);

    assert!(matches!(result, Err(PlannerError::InvalidStockPanel(name)) if name == "broken"));
}
