//! Theoretical reference curves overlaid on empirical series.
//!
//! A reference curve has the shape of a complexity class and is scaled by a
//! single global factor so that it is visually comparable with the measured
//! curve. It is not a statistical fit.

/// Complexity class drawn as a reference overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveKind {
    /// No overlay.
    #[default]
    None,
    /// O(1): horizontal line at the mean of the measurements.
    Flat,
    /// O(n).
    Linear,
    /// O(n log n).
    Linearithmic,
}

impl CurveKind {
    /// Legend label of the overlay, `None` for [`CurveKind::None`].
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            CurveKind::None => None,
            CurveKind::Flat => Some("O(1) Ref"),
            CurveKind::Linear => Some("O(n) Ref"),
            CurveKind::Linearithmic => Some("O(n log n) Ref"),
        }
    }
}

/// Why no reference curve could be built for a series.
///
/// These are never fatal: the caller omits the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// The series has no measured value.
    #[error("{0:?} reference needs at least one measured value")]
    EmptyValues(CurveKind),
    /// The series has no input size.
    #[error("{0:?} reference needs at least one input size")]
    EmptyDomain(CurveKind),
    /// Every input size is zero, so the curve cannot be scaled.
    #[error("linear reference cannot be scaled over a domain whose maximum is {max_x}")]
    DegenerateDomain {
        /// Largest input size of the series.
        max_x: u64,
    },
}

/// A scaled theoretical curve.
///
/// `x_values` and `y_values` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    x_values: Vec<u64>,
    y_values: Vec<f64>,
}

/// Unscaled `x · log₂(x)`, with the `x = 0` limit taken as `0`.
#[must_use]
pub fn n_log_n(x: u64) -> f64 {
    if x == 0 {
        0.0
    } else {
        let x = x as f64;
        x * x.log2()
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

impl ReferenceCurve {
    /// Builds the reference curve of `kind` for the series `(xs, ys)`.
    ///
    /// `xs` is expected in ascending order. Returns `Ok(None)` for
    /// [`CurveKind::None`].
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceError`] when the series is too degenerate for the
    /// requested kind. See [`ReferenceCurve::flat`],
    /// [`ReferenceCurve::linear`] and [`ReferenceCurve::linearithmic`].
    pub fn generate(
        kind: CurveKind,
        xs: &[u64],
        ys: &[f64],
    ) -> Result<Option<Self>, ReferenceError> {
        match kind {
            CurveKind::None => Ok(None),
            CurveKind::Flat => Self::flat(xs, ys).map(Some),
            CurveKind::Linear => Self::linear(xs, ys).map(Some),
            CurveKind::Linearithmic => Self::linearithmic(xs, ys).map(Some),
        }
    }

    /// Horizontal line at the mean of `ys`, spanning `[min(xs), max(xs)]`.
    ///
    /// The span falls back to `[0, 1]` when `xs` is empty.
    ///
    /// # Errors
    ///
    /// [`ReferenceError::EmptyValues`] if `ys` is empty.
    pub fn flat(xs: &[u64], ys: &[f64]) -> Result<Self, ReferenceError> {
        if ys.is_empty() {
            return Err(ReferenceError::EmptyValues(CurveKind::Flat));
        }
        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let span = match (xs.iter().min(), xs.iter().max()) {
            (Some(&lo), Some(&hi)) => vec![lo, hi],
            _ => vec![0, 1],
        };
        Ok(Self {
            y_values: vec![mean; span.len()],
            x_values: span,
        })
    }

    /// `y = x`, scaled by `max(ys) / max(xs)`.
    ///
    /// # Errors
    ///
    /// [`ReferenceError::EmptyDomain`] or [`ReferenceError::EmptyValues`] on
    /// empty input, [`ReferenceError::DegenerateDomain`] when `max(xs)` is 0.
    pub fn linear(xs: &[u64], ys: &[f64]) -> Result<Self, ReferenceError> {
        let Some(&max_x) = xs.iter().max() else {
            return Err(ReferenceError::EmptyDomain(CurveKind::Linear));
        };
        if ys.is_empty() {
            return Err(ReferenceError::EmptyValues(CurveKind::Linear));
        }
        if max_x == 0 {
            return Err(ReferenceError::DegenerateDomain { max_x });
        }
        let scale = max_of(ys) / max_x as f64;
        Ok(Self::scaled(xs, xs.iter().map(|&x| x as f64), scale))
    }

    /// `y = x · log₂(x)`, scaled so that its maximum matches `max(ys)`.
    ///
    /// When every unscaled value is 0 the scale factor is 1 and the raw curve
    /// is returned.
    ///
    /// # Errors
    ///
    /// [`ReferenceError::EmptyDomain`] or [`ReferenceError::EmptyValues`] on
    /// empty input.
    pub fn linearithmic(xs: &[u64], ys: &[f64]) -> Result<Self, ReferenceError> {
        if xs.is_empty() {
            return Err(ReferenceError::EmptyDomain(CurveKind::Linearithmic));
        }
        if ys.is_empty() {
            return Err(ReferenceError::EmptyValues(CurveKind::Linearithmic));
        }
        let unscaled: Vec<f64> = xs.iter().map(|&x| n_log_n(x)).collect();
        let peak = max_of(&unscaled);
        let scale = if peak > 0.0 { max_of(ys) / peak } else { 1.0 };
        Ok(Self::scaled(xs, unscaled, scale))
    }

    fn scaled(xs: &[u64], unscaled: impl IntoIterator<Item = f64>, scale: f64) -> Self {
        Self {
            x_values: xs.to_vec(),
            y_values: unscaled.into_iter().map(|v| v * scale).collect(),
        }
    }

    /// Input sizes of the curve.
    #[must_use]
    pub fn x_values(&self) -> &[u64] {
        &self.x_values
    }

    /// Scaled reference values, paired 1:1 with [`Self::x_values`].
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    /// Whether the curve has no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    /// Points as plotting coordinates.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values
            .iter()
            .zip(&self.y_values)
            .map(|(&x, &y)| (x as f64, y))
    }
}
