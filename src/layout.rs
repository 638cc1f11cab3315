//! Static description of the report grid.

use crate::records::ValueField;
use crate::reference::CurveKind;

/// Number of panel rows in the figure.
pub const GRID_ROWS: usize = 2;
/// Number of panel columns in the figure.
pub const GRID_COLS: usize = 4;

const TIME_LABEL: &str = "Time (ns)";
const MEMORY_LABEL: &str = "Δ Memory (KB)";
const HISTORY_SIZE: &str = "History Size (marks)";
const STUDENTS: &str = "Number of Students";
const ITEMS: &str = "Number of Items";

const MARK_OPS: &[&str] = &["PushMark", "RollbackMark", "LatestMark"];
const MERGE_SORT: &[&str] = &["MergeSort"];
const HISTORY_DISPLAY: &[&str] = &["HistoryDisplay"];
const HASHMAP_OPS: &[&str] = &["HashMapPut", "HashMapGet", "HashMapRemove"];

/// Cell of the report grid, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    /// Row index, `0` is the top row.
    pub row: usize,
    /// Column index, `0` is the leftmost column.
    pub col: usize,
}

impl GridPosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index of the cell in a grid `cols` wide, or `None` when the
    /// position lies outside a `rows × cols` grid.
    #[must_use]
    pub fn index_in(self, rows: usize, cols: usize) -> Option<usize> {
        (self.row < rows && self.col < cols).then_some(self.row * cols + self.col)
    }
}

impl core::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Declarative description of one chart of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    /// Where the chart sits in the grid.
    pub position: GridPosition,
    /// Operations drawn in the chart. The first one present in the dataset
    /// drives the reference curve.
    pub operations: Vec<String>,
    /// Reference overlay.
    pub curve: CurveKind,
    /// Chart caption.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Measured quantity plotted on the y axis.
    pub field: ValueField,
}

impl PanelSpec {
    /// Creates a spec; the y label follows from `field`.
    #[must_use]
    pub fn new(
        position: GridPosition,
        operations: &[&str],
        field: ValueField,
        curve: CurveKind,
        title: &str,
        x_label: &str,
    ) -> Self {
        let y_label = match field {
            ValueField::Time => TIME_LABEL,
            ValueField::Memory => MEMORY_LABEL,
        };
        Self {
            position,
            operations: operations.iter().map(ToString::to_string).collect(),
            curve,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            field,
        }
    }
}

/// The fixed 2×4 report: time charts on the top row, memory on the bottom.
#[must_use]
pub fn default_layout() -> Vec<PanelSpec> {
    use CurveKind::{Flat, Linear, Linearithmic};
    use ValueField::{Memory, Time};

    vec![
        PanelSpec::new(
            GridPosition::new(0, 0),
            MARK_OPS,
            Time,
            Flat,
            "Time — O(1) ops vs History Size",
            HISTORY_SIZE,
        ),
        PanelSpec::new(
            GridPosition::new(0, 1),
            MERGE_SORT,
            Time,
            Linearithmic,
            "Time — Merge Sort vs Students",
            STUDENTS,
        ),
        PanelSpec::new(
            GridPosition::new(0, 2),
            HISTORY_DISPLAY,
            Time,
            Linear,
            "Time — History Traversal vs History Size",
            HISTORY_SIZE,
        ),
        PanelSpec::new(
            GridPosition::new(0, 3),
            HASHMAP_OPS,
            Time,
            Flat,
            "Time — HashMap Put/Get/Remove",
            ITEMS,
        ),
        PanelSpec::new(
            GridPosition::new(1, 0),
            MARK_OPS,
            Memory,
            Flat,
            "Memory — O(1) ops vs History Size",
            HISTORY_SIZE,
        ),
        PanelSpec::new(
            GridPosition::new(1, 1),
            MERGE_SORT,
            Memory,
            Flat,
            "Memory — Merge Sort vs Students",
            STUDENTS,
        ),
        PanelSpec::new(
            GridPosition::new(1, 2),
            HISTORY_DISPLAY,
            Memory,
            Flat,
            "Memory — History Traversal vs History Size",
            HISTORY_SIZE,
        ),
        PanelSpec::new(
            GridPosition::new(1, 3),
            HASHMAP_OPS,
            Memory,
            Flat,
            "Memory — HashMap Ops",
            ITEMS,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_fills_grid_once() {
        let layout = default_layout();
        assert_eq!(layout.len(), GRID_ROWS * GRID_COLS);

        let mut indices: Vec<usize> = layout
            .iter()
            .map(|spec| spec.position.index_in(GRID_ROWS, GRID_COLS).unwrap())
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..GRID_ROWS * GRID_COLS).collect::<Vec<_>>());
    }

    #[test]
    fn test_rows_split_time_and_memory() {
        for spec in default_layout() {
            let expected = if spec.position.row == 0 {
                ValueField::Time
            } else {
                ValueField::Memory
            };
            assert_eq!(spec.field, expected, "{}", spec.title);
        }
    }

    #[test]
    fn test_curve_assignment() {
        let curves: Vec<(GridPosition, CurveKind)> = default_layout()
            .iter()
            .map(|spec| (spec.position, spec.curve))
            .collect();
        assert!(curves.contains(&(GridPosition::new(0, 1), CurveKind::Linearithmic)));
        assert!(curves.contains(&(GridPosition::new(0, 2), CurveKind::Linear)));
        let flat = curves
            .iter()
            .filter(|(_, kind)| *kind == CurveKind::Flat)
            .count();
        assert_eq!(flat, 6);
    }

    #[test]
    fn test_hashmap_panels() {
        let layout = default_layout();
        let spec = &layout[3];
        assert_eq!(spec.position, GridPosition::new(0, 3));
        assert_eq!(
            spec.operations,
            vec!["HashMapPut", "HashMapGet", "HashMapRemove"]
        );
        assert_eq!(spec.y_label, "Time (ns)");
        assert_eq!(layout[7].y_label, "Δ Memory (KB)");
    }

    #[test]
    fn test_index_outside_grid() {
        assert_eq!(GridPosition::new(1, 3).index_in(2, 4), Some(7));
        assert_eq!(GridPosition::new(2, 0).index_in(2, 4), None);
        assert_eq!(GridPosition::new(0, 4).index_in(2, 4), None);
    }
}
