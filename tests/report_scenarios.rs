//! End-to-end scenarios: CSV text in, composed panels and SVG out.

use complexity_plot::{
    CurveKind, Dataset, FigureStyle, GridPosition, PanelIssue, PanelSpec, ReportBuilder,
    ValueField, compose, compose_panel, default_layout, render_report,
};

// =============================================================================
// Fixtures
// =============================================================================

const HEADER: &str = "Operation,InputSize,TimeNanoseconds,MemoryKB\n";

/// A run of the full benchmark harness, rows shuffled across operations.
fn full_run() -> Dataset {
    let rows = "\
PushMark,1000,80,0
PushMark,10,90,0
RollbackMark,10,60,0
RollbackMark,1000,64,1
LatestMark,1000,20,0
LatestMark,10,22,0
MergeSort,10,400,2
MergeSort,100,6600,12
MergeSort,1000,99000,120
HistoryDisplay,10,1000,1
HistoryDisplay,100,9000,4
HistoryDisplay,1000,101000,40
HashMapPut,100,150,3
HashMapPut,10,140,1
HashMapGet,10,70,0
HashMapGet,100,75,0
HashMapRemove,10,95,0
HashMapRemove,100,99,-1
";
    format!("{HEADER}{rows}").parse().unwrap()
}

fn render(dataset: &Dataset, layout: &[PanelSpec]) -> (complexity_plot::RenderSummary, String) {
    let mut svg = String::new();
    let builder = ReportBuilder::for_string(&mut svg, &FigureStyle::default()).unwrap();
    let summary = render_report(dataset, layout, builder).unwrap();
    (summary, svg)
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_grouping_counts() {
    let dataset: Dataset = "Op,Size,Time,Mem\n\
                            A,1,10,0\n\
                            B,1,20,0\n\
                            A,2,30,0\n\
                            C,5,40,0\n\
                            A,3,50,0\n"
        .parse()
        .unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.record_count(), 5);
    assert_eq!(dataset.get("A").unwrap().len(), 3);
    assert_eq!(dataset.get("B").unwrap().len(), 1);
    assert_eq!(dataset.get("C").unwrap().len(), 1);
    assert!(dataset.get("D").is_none());
}

#[test]
fn test_every_series_sorted_by_input_size() {
    let dataset = full_run();
    for series in dataset.iter() {
        let sizes = series.input_sizes();
        assert!(
            sizes.windows(2).all(|pair| pair[0] <= pair[1]),
            "{}: {sizes:?}",
            series.name()
        );
    }
    assert_eq!(
        dataset.get("HashMapPut").unwrap().values(ValueField::Time),
        vec![140.0, 150.0]
    );
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_linear_reference_scaled_to_last_point() {
    let dataset: Dataset = "Op,Size,Time,Mem\nA,1,100.0,1.0\nA,2,180.0,1.0\nA,4,300.0,1.0\n"
        .parse()
        .unwrap();
    let spec = PanelSpec::new(
        GridPosition::new(0, 2),
        &["A"],
        ValueField::Time,
        CurveKind::Linear,
        "Linear",
        "n",
    );

    let plot = compose_panel(&dataset, &spec);
    let reference = plot.reference.unwrap();
    assert_eq!(reference.x_values(), &[1, 2, 4]);
    assert_eq!(reference.y_values(), &[75.0, 150.0, 300.0]);
    assert!(plot.issues.is_empty());
}

#[test]
fn test_missing_operations_leave_panel_empty() {
    let dataset: Dataset = format!("{HEADER}Other,1,5,0\n").parse().unwrap();
    let spec = PanelSpec::new(
        GridPosition::new(0, 0),
        &["X", "Y"],
        ValueField::Time,
        CurveKind::Flat,
        "Nothing here",
        "n",
    );

    let plot = compose_panel(&dataset, &spec);
    assert!(plot.is_empty());
    assert!(plot.legend_labels().is_empty());
    assert_eq!(
        plot.issues,
        vec![
            PanelIssue::UnresolvedOperation {
                operation: "X".to_string()
            },
            PanelIssue::UnresolvedOperation {
                operation: "Y".to_string()
            },
            PanelIssue::NoPrimaryOperation,
        ]
    );

    let (summary, svg) = render(&dataset, &[spec]);
    assert_eq!(summary.panels, 1);
    assert_eq!(summary.empirical_curves, 0);
    assert_eq!(summary.reference_curves, 0);
    assert_eq!(summary.issues, 3);
    assert!(svg.contains("Nothing here"));
}

#[test]
fn test_full_layout_composition() {
    let dataset = full_run();
    let layout = default_layout();
    let plots = compose(&dataset, &layout);

    assert_eq!(plots.len(), 8);
    for plot in &plots {
        assert!(plot.issues.is_empty(), "{}: {:?}", plot.spec.title, plot.issues);
        assert!(plot.reference.is_some(), "{}", plot.spec.title);
    }

    let merge_sort_time = &plots[1];
    assert_eq!(merge_sort_time.spec.curve, CurveKind::Linearithmic);
    assert_eq!(
        merge_sort_time.legend_labels(),
        vec!["MergeSort", "O(n log n) Ref"]
    );
    let peak = merge_sort_time.reference.as_ref().unwrap().y_values()[2];
    assert!((peak - 99000.0).abs() < 1e-6);

    let hashmap_memory = &plots[7];
    assert_eq!(
        hashmap_memory.legend_labels(),
        vec!["HashMapPut", "HashMapGet", "HashMapRemove", "O(1) Ref"]
    );
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_full_report_svg() {
    let dataset = full_run();
    let layout = default_layout();
    let (summary, svg) = render(&dataset, &layout);

    assert_eq!(summary.panels, 8);
    assert_eq!(summary.empirical_curves, 16);
    assert_eq!(summary.reference_curves, 8);
    assert_eq!(summary.issues, 0);

    assert!(svg.contains("<svg"));
    for spec in &layout {
        assert!(svg.contains(spec.title.as_str()), "{}", spec.title);
    }
    assert!(svg.contains("History Size (marks)"));
    assert!(svg.contains("Number of Students"));
    assert!(svg.contains("O(n) Ref"));
    assert!(svg.contains("O(n log n) Ref"));
}

#[test]
fn test_partial_run_still_renders_every_panel() {
    let dataset: Dataset = format!("{HEADER}MergeSort,10,400,2\nMergeSort,100,6600,12\n")
        .parse()
        .unwrap();
    let (summary, svg) = render(&dataset, &default_layout());

    assert_eq!(summary.panels, 8);
    assert_eq!(summary.empirical_curves, 2);
    assert_eq!(summary.reference_curves, 2);
    assert!(summary.issues > 0);
    assert!(svg.contains("Time — HashMap Put/Get/Remove"));
}

#[test]
fn test_position_outside_grid_is_skipped() {
    let dataset = full_run();
    let mut layout = default_layout();
    layout.push(PanelSpec::new(
        GridPosition::new(2, 0),
        &["MergeSort"],
        ValueField::Time,
        CurveKind::None,
        "Ninth panel",
        "n",
    ));

    let (summary, svg) = render(&dataset, &layout);
    assert_eq!(summary.panels, 8);
    assert_eq!(summary.issues, 1);
    assert!(!svg.contains("Ninth panel"));
}
