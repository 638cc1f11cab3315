//! Property checks shared by the fuzz targets.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`check_load_records`]: feed arbitrary text through the loader and the
//!   composer, asserting the loaded series are sorted
//! - [`check_reference_curves`]: build every reference curve kind for an
//!   arbitrary series, asserting every produced curve is well formed

use arbitrary::{Arbitrary, Unstructured};

use crate::composer::compose;
use crate::layout::default_layout;
use crate::records::{Dataset, ValueField};
use crate::reference::{CurveKind, ReferenceCurve};

/// A measured series as the fuzzer generates it.
#[derive(Debug, Clone, Arbitrary)]
pub struct FuzzSeries {
    /// Input sizes, not necessarily sorted.
    pub xs: Vec<u64>,
    /// Measured values, possibly non-finite.
    pub ys: Vec<f64>,
}

/// Loads `data` as benchmark CSV and composes the default report from it.
///
/// Loading may fail, but must not panic. When it succeeds, every series is
/// sorted by input size and the composer yields one plot per panel, each with
/// finite, non-empty axis ranges.
///
/// # Panics
///
/// Panics if a loaded series is out of order, a panel is lost, or an axis
/// range is infinite or empty.
pub fn check_load_records(data: &[u8]) {
    let Ok(dataset) = Dataset::from_reader(data) else {
        return;
    };

    for series in dataset.iter() {
        let sizes = series.input_sizes();
        assert!(
            sizes.windows(2).all(|pair| pair[0] <= pair[1]),
            "series `{}` is not sorted: {sizes:?}",
            series.name()
        );
        assert_eq!(series.values(ValueField::Time).len(), sizes.len());
    }

    let layout = default_layout();
    let plots = compose(&dataset, &layout);
    assert_eq!(plots.len(), layout.len());
    for plot in &plots {
        let bounds = plot.bounds();
        for range in [&bounds.x, &bounds.y] {
            assert!(
                range.start.is_finite() && range.end.is_finite(),
                "{bounds:?}"
            );
            assert!(range.start < range.end, "{bounds:?}");
            assert!((range.end - range.start).is_finite(), "{bounds:?}");
        }
    }
}

/// Builds every reference curve kind for a series decoded from `data`.
///
/// # Panics
///
/// Panics if a produced curve has mismatched coordinate counts.
pub fn check_reference_curves(data: &[u8]) {
    let Ok(mut series) = FuzzSeries::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    series.xs.sort_unstable();

    for kind in [
        CurveKind::None,
        CurveKind::Flat,
        CurveKind::Linear,
        CurveKind::Linearithmic,
    ] {
        match ReferenceCurve::generate(kind, &series.xs, &series.ys) {
            Ok(Some(curve)) => {
                assert_ne!(kind, CurveKind::None);
                assert_eq!(curve.x_values().len(), curve.y_values().len());
                assert_eq!(curve.points().count(), curve.len());
            }
            Ok(None) => assert_eq!(kind, CurveKind::None),
            Err(_) => assert_ne!(kind, CurveKind::None),
        }
    }
}
