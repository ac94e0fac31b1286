use cutplan_core::{
    plan_job, Material, PlanIssue, PlanRequest, PlannerError, RequiredPiece, StockPanel,
};
use float_cmp::approx_eq;
use test_case::test_case;

fn pieces(sizes: &[(f64, f64, u32, u32)]) -> Vec<RequiredPiece> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(width_cm, height_cm, thickness_mm, quantity))| RequiredPiece {
            id: format!("piece_{}", i + 1),
            name: format!("Piece {}", i + 1),
            width_cm,
            height_cm,
            thickness_mm,
            quantity,
            edge_band_sides: None,
        })
        .collect()
}

fn request(sizes: &[(f64, f64, u32, u32)]) -> PlanRequest {
    PlanRequest {
        material: Material::Mdf,
        pieces: pieces(sizes),
        stock_panels: None,
        price_per_sqm: None,
    }
}

#[test_case(&[(240.0, 120.0, 18, 1)], 1, 0; "single large piece")]
#[test_case(&[(60.0, 40.0, 18, 1); 5], 1, 0; "five small pieces share a panel")]
#[test_case(&[(300.0, 50.0, 18, 1)], 0, 1; "oversized piece")]
#[test_case(&[(140.0, 70.0, 18, 1), (140.0, 70.0, 25, 1)], 2, 0; "two thicknesses")]
#[test_case(&[], 0, 0; "no pieces")]
fn test_scenarios(sizes: &[(f64, f64, u32, u32)], total_panels: u32, issues: usize) {
    let job = plan_job(&request(sizes)).unwrap();

    assert_eq!(job.plan.total_panels, total_panels);
    assert_eq!(job.plan.issues.len(), issues);
    assert_eq!(job.purchase_list.len(), job.plan.groups.len());
    assert!(job.estimate.is_none());
}

#[test]
fn test_single_piece_waste_percentage() {
    let job = plan_job(&request(&[(240.0, 120.0, 18, 1)])).unwrap();

    let group = &job.plan.groups[0];
    assert!(approx_eq!(f64, group.waste_percentage, 3.2518, epsilon = 1e-3));
    assert!(approx_eq!(f64, job.plan.waste_percentage(), 3.2518, epsilon = 1e-3));
}

#[test]
fn test_oversized_piece_is_named() {
    let job = plan_job(&request(&[(300.0, 50.0, 18, 1)])).unwrap();

    match &job.plan.issues[0] {
        PlanIssue::UnplaceablePiece {
            piece_id,
            stock_width_cm,
            stock_height_cm,
            ..
        } => {
            assert_eq!(piece_id, "piece_1");
            assert_eq!((*stock_width_cm, *stock_height_cm), (244.0, 122.0));
        }
        other => panic!("unexpected issue: {other}"),
    }
}

#[test]
fn test_request_catalog_and_price() {
    let mut req = request(&[(90.0, 40.0, 18, 2)]);
    req.stock_panels = Some(vec![StockPanel {
        width_cm: 100.0,
        height_cm: 100.0,
        thickness_mm: 18,
        material: Material::Mdf,
        name: "Square offcut".to_string(),
    }]);
    req.price_per_sqm = Some(90.0);

    let job = plan_job(&req).unwrap();

    assert_eq!(job.plan.total_panels, 1);
    assert_eq!(job.purchase_list[0].panel_name, "Square offcut");
    assert_eq!(job.purchase_list[0].panel_size, "100x100 cm");

    let estimate = job.estimate.unwrap();
    assert!(approx_eq!(f64, estimate.panels_cost, 90.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, estimate.waste_cost, 90.0 * 0.28, epsilon = 1e-9));
}

#[test]
fn test_invalid_requests() {
    let zero_quantity = request(&[(60.0, 40.0, 18, 0)]);
    assert!(matches!(
        plan_job(&zero_quantity),
        Err(PlannerError::InvalidInput(_))
    ));

    let flat = request(&[(60.0, 0.0, 18, 1)]);
    assert!(matches!(plan_job(&flat), Err(PlannerError::InvalidInput(_))));

    let mut negative_price = request(&[(60.0, 40.0, 18, 1)]);
    negative_price.price_per_sqm = Some(-1.0);
    assert!(matches!(
        plan_job(&negative_price),
        Err(PlannerError::InvalidInput(_))
    ));
}

#[test]
fn test_plan_is_deterministic() {
    let sizes = [
        (140.0, 70.0, 18, 1),
        (70.0, 72.0, 18, 2),
        (46.0, 18.75, 18, 2),
        (65.0, 15.75, 18, 4),
        (116.0, 73.0, 12, 1),
        (29.0, 71.0, 18, 2),
    ];

    let first = serde_json::to_string(&plan_job(&request(&sizes)).unwrap()).unwrap();
    let second = serde_json::to_string(&plan_job(&request(&sizes)).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_request_from_json() {
    let json = r#"{
        "material": "plywood",
        "pieces": [
            {"id": "top", "name": "Top", "width_cm": 120, "height_cm": 60, "thickness_mm": 18, "quantity": 1, "edge_band_sides": 4},
            {"id": "back", "name": "Back", "width_cm": 116, "height_cm": 73, "thickness_mm": 12, "quantity": 1}
        ]
    }"#;

    let req: PlanRequest = serde_json::from_str(json).unwrap();
    let job = plan_job(&req).unwrap();
    let value = serde_json::to_value(&job).unwrap();

    assert_eq!(value["plan"]["total_panels"], 1);
    assert_eq!(value["plan"]["issues"][0]["kind"], "missing_stock_panel");
    assert_eq!(value["plan"]["issues"][0]["thickness_mm"], 12);
    assert_eq!(value["plan"]["groups"][0]["panels"][0]["panel_number"], 1);
    assert!(value["plan"]["groups"][0]["panels"][0]["efficiency"].is_number());
    assert!(value.get("estimate").is_none());
}
