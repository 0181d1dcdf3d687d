//! Path segmentation: contiguous same-line runs become display segments.

use crate::identifiers::{LineRef, StopCode};
use crate::models::path::PathElement;
use crate::models::shapes::ShapePoint;

/// Display colors, assigned by a segment's position within its route.
/// The same line can wear different colors in different routes; adjacent
/// legs of one route never share a color.
pub const SEGMENT_PALETTE: [&str; 6] = [
    "#3388FF", "#E6553A", "#2FA84F", "#8E44AD", "#F39C12", "#16A2B8",
];

/// Neutral color for walking transfers.
pub const WALK_COLOR: &str = "#8A8A8E";

/// What a segment rides on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// A vehicle leg on a numbered line.
    Line(LineRef),
    /// A walking transfer between stops.
    Walk,
}

/// One maximal same-line run of a path, bounded by stop codes.
#[derive(Clone, Debug, PartialEq)]
pub struct LineInfo {
    pub kind: SegmentKind,
    pub start_code: StopCode,
    pub end_code: StopCode,
    pub color: &'static str,
    /// Waypoints for smooth drawing; empty until enrichment fills it in.
    pub shape: Vec<ShapePoint>,
}

impl LineInfo {
    /// The rider-facing tag: the line number, or the walk marker.
    pub fn line_number(&self) -> &str {
        match &self.kind {
            SegmentKind::Line(line) => line.as_str(),
            SegmentKind::Walk => LineRef::WALK,
        }
    }

    pub fn is_walk(&self) -> bool {
        self.kind == SegmentKind::Walk
    }

    pub fn line(&self) -> Option<&LineRef> {
        match &self.kind {
            SegmentKind::Line(line) => Some(line),
            SegmentKind::Walk => None,
        }
    }
}

/// Split a boundary-stripped path into same-line segments.
///
/// The scan starts at the second element: `line` annotates the line used
/// to *reach* a stop, so the first element says nothing about the journey
/// ahead. Runs annotated `None` or with the group marker produce no
/// segment; the literal walk line is kept as a walk segment. A segment
/// always starts at the stop *before* its block, so consecutive segments
/// chain end-to-start.
pub fn split_into_segments(path: &[PathElement]) -> Vec<LineInfo> {
    if path.len() < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = path[1].line.as_ref();
    let mut block_start = 1;

    for (i, element) in path.iter().enumerate().skip(2) {
        let line = element.line.as_ref();
        if line != current {
            close_block(&mut segments, current, path, block_start, i - 1);
            current = line;
            block_start = i;
        }
    }
    close_block(&mut segments, current, path, block_start, path.len() - 1);

    segments
}

fn close_block(
    segments: &mut Vec<LineInfo>,
    line: Option<&LineRef>,
    path: &[PathElement],
    block_start: usize,
    end_idx: usize,
) {
    let Some(line) = line else { return };
    if line.is_group_marker() {
        return;
    }

    let start_idx = block_start - 1; // the previous stop opens the segment
    let (Some(start), Some(end)) = (path.get(start_idx), path.get(end_idx)) else {
        return;
    };

    let walk = line.is_walk();
    let color = if walk {
        WALK_COLOR
    } else {
        SEGMENT_PALETTE[segments.len() % SEGMENT_PALETTE.len()]
    };
    let kind = if walk {
        SegmentKind::Walk
    } else {
        SegmentKind::Line(line.clone())
    };

    segments.push(LineInfo {
        kind,
        start_code: start.stop.code.clone(),
        end_code: end.stop.code.clone(),
        color,
        shape: Vec::new(),
    });
}
