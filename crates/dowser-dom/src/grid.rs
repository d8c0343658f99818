use std::collections::HashMap;

use tracing::debug;

use crate::element::Tag;
use crate::snapshot::{DomSnapshot, NodeId};

/// Grid position of one cell, including how far its spans reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoords {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Occupancy grid of one table. Spanning cells occupy every slot they
/// cover; missing or invalid span attributes count as 1. Rows of nested
/// tables belong to the nested table, never to this one.
#[derive(Debug)]
pub struct TableGrid {
    cols: usize,
    slots: Vec<Vec<Option<NodeId>>>,
    coords: HashMap<NodeId, CellCoords>,
}

impl TableGrid {
    pub fn build(snapshot: &DomSnapshot, table: NodeId) -> Self {
        let mut trs = Vec::new();
        collect_rows(snapshot, table, &mut trs);
        let mut slots: Vec<Vec<Option<NodeId>>> = Vec::new();
        let mut coords = HashMap::new();
        for (r, &tr) in trs.iter().enumerate() {
            while slots.len() <= r {
                slots.push(Vec::new());
            }
            let mut c = 0;
            for &cell in snapshot.children(tr) {
                if !snapshot.tag(cell).is_some_and(Tag::is_cell) {
                    continue;
                }
                // skip slots already taken by a rowspan from above
                while slots[r].get(c).copied().flatten().is_some() {
                    c += 1;
                }
                let col_span = span_attr(snapshot, cell, "colspan");
                let row_span = span_attr(snapshot, cell, "rowspan");
                for dr in 0..row_span {
                    let rr = r + dr;
                    while slots.len() <= rr {
                        slots.push(Vec::new());
                    }
                    if slots[rr].len() < c + col_span {
                        slots[rr].resize(c + col_span, None);
                    }
                    for dc in 0..col_span {
                        if slots[rr][c + dc].is_none() {
                            slots[rr][c + dc] = Some(cell);
                        }
                    }
                }
                coords.insert(cell, CellCoords { row: r, col: c, row_span, col_span });
                c += col_span;
            }
        }
        let cols = slots.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut slots {
            row.resize(cols, None);
        }
        debug!(rows = slots.len(), cols, cells = coords.len(), "table grid built");
        Self { cols, slots, coords }
    }

    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<NodeId> {
        self.slots.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn coords(&self, cell: NodeId) -> Option<CellCoords> {
        self.coords.get(&cell).copied()
    }
}

fn span_attr(snapshot: &DomSnapshot, cell: NodeId, name: &str) -> usize {
    snapshot
        .attr(cell, name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(1)
}

/// Collects the table's own `tr` elements, descending through row groups
/// but never into nested tables.
fn collect_rows(snapshot: &DomSnapshot, node: NodeId, out: &mut Vec<NodeId>) {
    for &child in snapshot.children(node) {
        match snapshot.tag(child) {
            Some(tag) if tag.is_row() => out.push(child),
            Some(tag) if tag.is_table() => {}
            Some(_) => collect_rows(snapshot, child, out),
            None => {}
        }
    }
}
