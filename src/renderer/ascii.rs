//! Terminal renderer
//!
//! Rasterises a snapshot onto a character grid, painting items in snapshot
//! order so higher z overwrites lower z.

use std::io::Write;

use super::snapshot::{DrawItem, RenderSnapshot};
use super::{RenderAdapter, RenderError};
use crate::Bounds;
use crate::sim::EntityKind;

const EMPTY: char = '.';

fn glyph(item: &DrawItem) -> char {
    match (item.kind, item.infected) {
        (EntityKind::Player, false) => '@',
        (EntityKind::Player, true) => '&',
        (EntityKind::Collectible, _) => '$',
        (EntityKind::Hazard, true) => 'Z',
        (EntityKind::Hazard, false) => 'z',
        (EntityKind::Wanderer, true) => 'W',
        (EntityKind::Wanderer, false) => 'w',
    }
}

pub struct AsciiRenderer<W: Write> {
    out: W,
    bounds: Bounds,
    columns: usize,
    rows: usize,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, bounds: Bounds, columns: usize, rows: usize) -> Self {
        Self {
            out,
            bounds,
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Cell span `[start, end)` covering `lo..hi` along one axis
    fn span(lo: f32, hi: f32, origin: f32, extent: f32, cells: usize) -> (usize, usize) {
        let extent = extent.max(f32::EPSILON);
        let n = cells as f32;
        let start = ((lo - origin) * n / extent).floor().max(0.0) as usize;
        let end = ((hi - origin) * n / extent).ceil().max(0.0) as usize;
        let start = start.min(cells - 1);
        (start, end.clamp(start + 1, cells))
    }

    /// Grid lines for a frame, header first
    pub fn rasterize(&self, frame: &RenderSnapshot) -> Vec<String> {
        let mut grid = vec![vec![EMPTY; self.columns]; self.rows];

        for item in &frame.items {
            let half = item.size * 0.5;
            let (c0, c1) = Self::span(
                item.center.x - half.x,
                item.center.x + half.x,
                self.bounds.left,
                self.bounds.width(),
                self.columns,
            );
            let (r0, r1) = Self::span(
                item.center.y - half.y,
                item.center.y + half.y,
                self.bounds.top,
                self.bounds.height(),
                self.rows,
            );
            let g = glyph(item);
            for row in &mut grid[r0..r1] {
                for cell in &mut row[c0..c1] {
                    *cell = g;
                }
            }
        }

        let mut lines = Vec::with_capacity(self.rows + 1);
        lines.push(format!(
            "{}  | {} [{}] | tick {}",
            frame.score_line(),
            frame.level_name,
            frame.background,
            frame.tick
        ));
        lines.extend(grid.into_iter().map(|row| row.into_iter().collect::<String>()));
        lines
    }
}

impl<W: Write> RenderAdapter for AsciiRenderer<W> {
    fn present(&mut self, frame: &RenderSnapshot) -> Result<(), RenderError> {
        let lines = self.rasterize(frame);
        for line in &lines {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
