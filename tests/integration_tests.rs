use waste_dashboard::aggregators::disposal::DisposalCategory;
use waste_dashboard::aggregators::pie::PieMode;
use waste_dashboard::aggregators::waterfall::Waterfall;
use waste_dashboard::aggregators::{
    boxplot, campaigns, gauge, heatmap, kpi, pie, radar, sankey, scatter, waterfall, yearly,
};
use waste_dashboard::dashboard::Dashboard;
use waste_dashboard::model::Selection;
use waste_dashboard::output::build_city_report;
use waste_dashboard::render::palette::Palette;
use waste_dashboard::render::svg::to_svg;
use waste_dashboard::render::{Primitive, geometry};
use waste_dashboard::stats;

const FIXTURE: &[u8] = include_bytes!("fixtures/municipal_waste.csv");

fn load() -> Dashboard {
    Dashboard::from_csv_bytes(FIXTURE)
}

#[test]
fn test_load_and_city_index() {
    let dash = load();
    assert_eq!(dash.records().len(), 22);
    assert_eq!(dash.cities(), ["Indore", "Pune", "Surat"]);
    // Default selection is the first city in sorted order.
    assert_eq!(dash.selection().city.as_deref(), Some("Indore"));
}

#[test]
fn test_city_ranking() {
    let dash = load();
    let ranked = stats::rank_cities(dash.city_stats());

    let names: Vec<&str> = ranked.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(names, vec!["Pune", "Surat", "Indore"]);
    assert!((ranked[0].1.total_generated - 1340.0).abs() < 1e-9);
    assert!((ranked[1].1.total_generated - 530.0).abs() < 1e-9);
    assert!((ranked[2].1.total_generated - 400.0).abs() < 1e-9);
    assert!((ranked[0].1.population_density - 6000.0).abs() < 1e-9);
}

#[test]
fn test_yearly_trend_for_selected_city() {
    let dash = load();
    let totals = yearly::aggregate(dash.records(), &Selection::for_city("Pune"));

    let years: Vec<i32> = totals.iter().map(|t| t.year).collect();
    assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023]);

    // 2019: 100 t plastic at 30% + 200 t organic at 0%.
    assert!((totals[0].generated - 300.0).abs() < 1e-9);
    assert!((totals[0].recycled - 30.0).abs() < 1e-9);
    // 2023: 140 at 50% + 230 at 0%.
    assert!((totals[4].generated - 370.0).abs() < 1e-9);
    assert!((totals[4].recycled - 70.0).abs() < 1e-9);
}

#[test]
fn test_kpi_panel() {
    let dash = load();
    let summary = kpi::aggregate(dash.records(), dash.city_stats());

    assert!((summary.total_volume - 2270.0).abs() < 1e-9);
    assert_eq!(summary.dominant_type.as_deref(), Some("Organic"));
    assert!((summary.dominant_type_share - 1235.0 / 2270.0 * 100.0).abs() < 1e-9);
    assert!(summary.mean_landfill_usage.is_some());
    assert!(summary.density_correlation.is_finite());
    assert!(summary.density_correlation.abs() <= 1.0);
}

#[test]
fn test_campaigns_leaderboard() {
    let dash = load();
    let page = campaigns::aggregate(dash.records(), &Selection::default());

    assert_eq!(page.page_count, 1);
    let pairs: Vec<(&str, u32)> = page
        .items
        .iter()
        .map(|i| (i.city.as_str(), i.campaigns))
        .collect();
    assert_eq!(pairs, vec![("Pune", 70), ("Indore", 66), ("Surat", 24)]);
}

#[test]
fn test_landfill_gauge_latest_year() {
    let dash = load();
    let stats = gauge::aggregate(dash.records(), &Selection::for_city("Pune"));

    assert_eq!(stats.year, Some(2023));
    assert!((stats.generated - 370.0).abs() < 1e-9);
    // Capacity repeats per row; one landfill, so the max is taken once.
    assert!((stats.capacity - 300_000.0).abs() < 1e-9);
    assert!((stats.percent - 370.0 / 300_000.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_waterfall_decomposition() {
    let dash = load();
    match waterfall::aggregate(dash.records(), &Selection::for_city("Pune")) {
        Waterfall::Breakdown { collected, steps } => {
            assert!((collected - 1340.0).abs() < 1e-9);

            let step = |cat: DisposalCategory| {
                steps
                    .iter()
                    .find(|s| s.category == cat)
                    .map(|s| s.value)
                    .unwrap_or(0.0)
            };
            assert!((step(DisposalCategory::Recycling) - 600.0).abs() < 1e-9);
            assert!((step(DisposalCategory::Compost) - 640.0).abs() < 1e-9);
            // "Landfill" rows plus "Open Dumping", which maps into landfill.
            assert!((step(DisposalCategory::Landfill) - 100.0).abs() < 1e-9);

            let sum: f64 = steps.iter().map(|s| s.value).sum();
            assert!((sum - collected).abs() < 1e-9);
        }
        Waterfall::InsufficientData => panic!("expected breakdown"),
    }
}

#[test]
fn test_sankey_conserves_flow() {
    let dash = load();
    let graph = sankey::aggregate(dash.records(), &Selection::for_city("Pune"));

    // Four waste types, so no merged bucket appears.
    assert_eq!(
        graph.sources,
        vec!["Organic", "Plastic", "Construction", "E-Waste"]
    );
    let link_sum: f64 = graph.links.iter().map(|l| l.value).sum();
    assert!((link_sum - 1340.0).abs() < 1e-9);
    for link in &graph.links {
        assert!(link.layout_value >= link.value);
    }
}

#[test]
fn test_heatmap_dense_matrix() {
    let dash = load();
    let matrix = heatmap::aggregate(dash.records(), &Selection::for_city("Pune"));

    assert_eq!(matrix.years, vec![2019, 2020, 2021, 2022, 2023]);
    assert_eq!(matrix.waste_types.len(), 4);
    assert_eq!(matrix.cells.len(), 20);
    assert_eq!(matrix.value("Construction", 2021), Some(80.0));
    assert_eq!(matrix.value("Construction", 2019), Some(0.0));
}

#[test]
fn test_cost_boxes_cover_fixed_years() {
    let dash = load();
    let years = boxplot::aggregate(dash.records(), &Selection::for_city("Pune"));

    assert_eq!(years.len(), 5);
    for year in &years {
        assert_eq!(year.sample_count, 2);
        let summary = year.summary.as_ref().expect("two samples per year");
        assert!(summary.q1 <= summary.median && summary.median <= summary.q3);
    }
}

#[test]
fn test_radar_three_city_comparison() {
    let dash = load();
    let mut sel = Selection::for_city("Pune");
    sel.radar_cities = vec!["Surat".into(), "Indore".into()];

    let chart = radar::aggregate(dash.records(), &sel);
    assert_eq!(chart.axes.len(), 7);
    assert_eq!(chart.snapshots.len(), 3);
    for snap in &chart.snapshots {
        assert_eq!(snap.year, Some(2023));
        assert!(snap.normalized.iter().all(|n| (0.0..=1.0).contains(n)));
    }
}

#[test]
fn test_scatter_bubbles_per_city() {
    let dash = load();
    let bubbles = scatter::aggregate(dash.records(), &Selection::default());

    // Encounter order of the file, not sorted.
    let names: Vec<&str> = bubbles.iter().map(|b| b.city.as_str()).collect();
    assert_eq!(names, vec!["Pune", "Surat", "Indore"]);

    let pune = &bubbles[0];
    assert!((pune.total_generated - 1340.0).abs() < 1e-9);
    assert!((pune.population_density - 6000.0).abs() < 1e-9);
    assert_eq!(pune.primary_type, "Organic");
}

#[test]
fn test_pie_modes() {
    let dash = load();
    let sel = Selection::for_city("Pune");

    let generated = pie::aggregate(dash.records(), &sel, PieMode::Generated);
    let types: Vec<&str> = generated.iter().map(|s| s.waste_type.as_str()).collect();
    assert_eq!(types, vec!["Organic", "Plastic", "Construction", "E-Waste"]);

    // Organic never recycles in the fixture, so it drops out entirely.
    let recycled = pie::aggregate(dash.records(), &sel, PieMode::Recycled);
    assert!(recycled.iter().all(|s| s.waste_type != "Organic"));
    assert_eq!(recycled[0].waste_type, "Plastic");
}

#[test]
fn test_chart_pipeline_to_svg() {
    let dash = load();
    let sel = Selection::for_city("Pune");
    let palette = Palette::default();

    let totals = yearly::aggregate(dash.records(), &sel);
    let primitives = geometry::line_chart(&totals, 800.0, 480.0, &palette);
    let doc = to_svg(800.0, 480.0, &primitives);

    assert!(doc.starts_with("<svg"));
    assert!(doc.ends_with("</svg>"));
    assert!(doc.contains("<circle"));
    // Year labels survive into the document.
    assert!(doc.contains("2023"));
}

#[test]
fn test_empty_chart_renders_placeholder() {
    let palette = Palette::default();
    let primitives = geometry::line_chart(&[], 800.0, 480.0, &palette);
    assert_eq!(primitives.len(), 1);
    assert!(matches!(&primitives[0], Primitive::Text { content, .. } if content == "No data"));
}

#[test]
fn test_city_report_bundle() {
    let dash = load();
    let report = build_city_report(dash.records(), "Pune");

    assert_eq!(report.city, "Pune");
    assert_eq!(report.schema_version, 1);
    assert_eq!(report.yearly.len(), 5);
    assert!((report.kpis.total_volume - 1340.0).abs() < 1e-9);
    assert!(matches!(report.disposal, Waterfall::Breakdown { .. }));
    assert_eq!(report.landfill.year, Some(2023));
    // Every section of the bundle is scoped to the report's city.
    let campaign_cities: Vec<&str> = report
        .campaigns
        .items
        .iter()
        .map(|i| i.city.as_str())
        .collect();
    assert_eq!(campaign_cities, vec!["Pune"]);
    assert_eq!(report.campaigns.items[0].campaigns, 70);
    assert!(serde_json::to_string(&report).is_ok());
}

#[test]
fn test_no_city_selection_yields_empty_aggregates() {
    let dash = load();
    let sel = Selection::default();

    // City-scoped aggregators must not fall back to the whole dataset.
    assert!(yearly::aggregate(dash.records(), &sel).is_empty());
    assert!(pie::aggregate(dash.records(), &sel, PieMode::Generated).is_empty());
    assert!(heatmap::aggregate(dash.records(), &sel).cells.is_empty());
    assert!(sankey::aggregate(dash.records(), &sel).links.is_empty());
    for year in boxplot::aggregate(dash.records(), &sel) {
        assert_eq!(year.sample_count, 0);
        assert!(year.summary.is_none());
    }
}

#[test]
fn test_top_recyclers_ranking() {
    let dash = load();
    let ranked = kpi::top_recyclers(dash.records());

    // Pune's mean rate (21.0) narrowly beats Indore's (20.83); Surat trails.
    let names: Vec<&str> = ranked.iter().map(|r| r.city.as_str()).collect();
    assert_eq!(names, vec!["Pune", "Indore", "Surat"]);
    assert!((ranked[0].mean_recycling_rate - 21.0).abs() < 1e-9);
    assert!((ranked[0].recycled_total - 247.0).abs() < 1e-9);
}

#[test]
fn test_unknown_city_selection_rejected() {
    let mut dash = load();
    assert!(!dash.select_city("Atlantis"));
    assert!(dash.select_city("Surat"));
    assert_eq!(dash.selection().city.as_deref(), Some("Surat"));
}
