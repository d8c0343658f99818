use dowser_dom::{CellCoords, NodeId, TableGrid};
use dowser_path::SearchPattern;

use crate::matcher::{CoordPatterns, MatchContext, MatchHit};

/// True when the element sits inside cells that satisfy every coordinate
/// pair of the search.
///
/// The walk starts at the cell holding the element and climbs outward, one
/// enclosing table per step. The innermost coordinate pair must be
/// satisfied first; each satisfied pair consumes the next outer one. An
/// element outside any table never satisfies coordinates.
pub fn element_in_coordinates(ctx: &MatchContext<'_>, element: NodeId) -> bool {
    let specs = ctx.coords();
    if specs.is_empty() {
        return true;
    }
    let snapshot = ctx.snapshot;
    let mut remaining = specs.iter().rev();
    let mut spec = match remaining.next() {
        Some(spec) => spec,
        None => return true,
    };
    let mut cell = snapshot.nearest_cell(element);
    while let Some(current) = cell {
        let Some(table) = snapshot.enclosing_table(current) else {
            return false;
        };
        let grid = ctx.grid(table);
        if cell_satisfies(ctx, &grid, current, spec) {
            match remaining.next() {
                None => return true,
                Some(next) => spec = next,
            }
        }
        cell = snapshot.parent(table).and_then(|p| snapshot.nearest_cell(p));
    }
    false
}

fn cell_satisfies(
    ctx: &MatchContext<'_>,
    grid: &TableGrid,
    cell: NodeId,
    spec: &CoordPatterns,
) -> bool {
    let Some(coords) = grid.coords(cell) else {
        return false;
    };
    column_satisfied(ctx, grid, coords, &spec.col) && row_satisfied(ctx, grid, coords, &spec.row)
}

/// A column is identified by any cell in it whose whole text matches the
/// column pattern, in any row. Spanning cells count for every column they
/// cover.
fn column_satisfied(
    ctx: &MatchContext<'_>,
    grid: &TableGrid,
    coords: CellCoords,
    pattern: &SearchPattern,
) -> bool {
    if pattern.is_empty() {
        return true;
    }
    for col in coords.col..coords.col + coords.col_span {
        for row in 0..grid.row_count() {
            if cell_text_matches(ctx, grid.cell_at(row, col), pattern) {
                return true;
            }
        }
    }
    false
}

fn row_satisfied(
    ctx: &MatchContext<'_>,
    grid: &TableGrid,
    coords: CellCoords,
    pattern: &SearchPattern,
) -> bool {
    if pattern.is_empty() {
        return true;
    }
    for row in coords.row..coords.row + coords.row_span {
        for col in 0..grid.col_count() {
            if cell_text_matches(ctx, grid.cell_at(row, col), pattern) {
                return true;
            }
        }
    }
    false
}

fn cell_text_matches(
    ctx: &MatchContext<'_>,
    cell: Option<NodeId>,
    pattern: &SearchPattern,
) -> bool {
    let Some(cell) = cell else {
        return false;
    };
    match ctx.index.text_of(cell) {
        Some(text) => pattern.matches(&text),
        None => false,
    }
}

/// Drops every hit whose element strictly contains another hit's element.
/// Container elements match wherever their content does; only the innermost
/// hits carry information.
pub fn remove_ancestors(ctx: &MatchContext<'_>, hits: Vec<MatchHit>) -> Vec<MatchHit> {
    let snapshot = ctx.snapshot;
    hits.iter()
        .filter(|hit| {
            !hits.iter().any(|other| {
                other.element != hit.element
                    && snapshot.is_strict_ancestor(hit.element, other.element)
            })
        })
        .cloned()
        .collect()
}
