//! Layout helpers for habitflow
//!
//! Provides:
//! - Vertical stacks of variable-height blocks with scrolling
//! - Staggered (masonry) grid placement for the journal
//! - Navigation helpers for both
//! - Off-screen rendering of scrolled content

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
};

/// Blank rows between stacked blocks
pub const STACK_GAP: u16 = 1;
/// Gap between grid lanes
pub const COLUMN_GAP: u16 = 2;

/// Top offsets for blocks stacked vertically with `gap` rows between them
pub fn stack_offsets(heights: &[u16], gap: u16) -> Vec<u16> {
    let mut y = 0u16;
    heights
        .iter()
        .map(|&h| {
            let top = y;
            y = y.saturating_add(h).saturating_add(gap);
            top
        })
        .collect()
}

/// Total height of a stack built by [`stack_offsets`]
pub fn stack_height(heights: &[u16], gap: u16) -> u16 {
    let gaps = gap.saturating_mul(heights.len().saturating_sub(1) as u16);
    heights.iter().fold(gaps, |acc, &h| acc.saturating_add(h))
}

/// Smallest change to `offset` that keeps `top..top+height` inside the viewport.
///
/// Items taller than the viewport are aligned to their top edge.
pub fn scroll_to_visible(offset: u16, top: u16, height: u16, viewport: u16) -> u16 {
    if viewport == 0 {
        return offset;
    }
    let bottom = top.saturating_add(height);
    if top < offset || height >= viewport {
        top
    } else if bottom > offset.saturating_add(viewport) {
        bottom - viewport
    } else {
        offset
    }
}

/// Clamp an offset so the last page is never scrolled past
pub fn clamp_offset(offset: u16, content_height: u16, viewport: u16) -> u16 {
    offset.min(content_height.saturating_sub(viewport))
}

/// Where a card sits in a staggered grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub lane: u16,
    pub top: u16,
    pub height: u16,
}

impl Placement {
    pub fn bottom(&self) -> u16 {
        self.top + self.height
    }

    fn center(&self) -> u16 {
        self.top + self.height / 2
    }
}

/// Staggered grid: fixed lane count, content-driven item heights
#[derive(Debug, Clone, Copy)]
pub struct StaggeredLayout {
    /// Number of lanes (default: 2)
    pub columns: u16,
    /// Vertical gap between items in a lane
    pub gap: u16,
}

impl Default for StaggeredLayout {
    fn default() -> Self {
        Self { columns: 2, gap: 1 }
    }
}

impl StaggeredLayout {
    /// Create a new layout
    pub fn new(columns: u16, gap: u16) -> Self {
        Self {
            columns: columns.clamp(1, 6),
            gap,
        }
    }

    /// Width of each lane for a given total width
    pub fn lane_width(&self, total_width: u16) -> u16 {
        let gaps = COLUMN_GAP * (self.columns - 1);
        total_width.saturating_sub(gaps) / self.columns
    }

    /// X offset of a lane relative to the grid origin
    pub fn lane_x(&self, lane: u16, total_width: u16) -> u16 {
        lane * (self.lane_width(total_width) + COLUMN_GAP)
    }

    /// Place items in input order, each into the currently shortest lane
    /// (leftmost on ties)
    pub fn place(&self, heights: &[u16]) -> Vec<Placement> {
        let mut lane_bottoms = vec![0u16; self.columns as usize];
        heights
            .iter()
            .map(|&height| {
                let (lane, &top) = lane_bottoms
                    .iter()
                    .enumerate()
                    .min_by_key(|&(i, &bottom)| (bottom, i))
                    .unwrap_or((0, &0));
                lane_bottoms[lane] = top.saturating_add(height).saturating_add(self.gap);
                Placement {
                    lane: lane as u16,
                    top,
                    height,
                }
            })
            .collect()
    }

    /// Height of the tallest lane
    pub fn content_height(placements: &[Placement]) -> u16 {
        placements.iter().map(Placement::bottom).max().unwrap_or(0)
    }

    /// Index of the card closest (by vertical center) in the neighbouring
    /// lane, or `current` when there is none
    pub fn neighbor(placements: &[Placement], current: usize, direction: Direction) -> usize {
        let Some(from) = placements.get(current) else {
            return current;
        };

        let target_lane = match direction {
            Direction::Left if from.lane > 0 => from.lane - 1,
            Direction::Right => from.lane + 1,
            Direction::Up => return current.saturating_sub(1),
            Direction::Down => return (current + 1).min(placements.len().saturating_sub(1)),
            Direction::Left => return current,
        };

        placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.lane == target_lane)
            .min_by_key(|(_, p)| p.center().abs_diff(from.center()))
            .map(|(i, _)| i)
            .unwrap_or(current)
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Move a list cursor by one, clamped to `0..total`
pub fn step(current: usize, total: usize, direction: Direction) -> usize {
    match direction {
        Direction::Up | Direction::Left => current.saturating_sub(1),
        Direction::Down | Direction::Right => {
            if current + 1 < total {
                current + 1
            } else {
                current
            }
        }
    }
}

/// Render content taller than `area` into an off-screen buffer and copy the
/// rows starting at `offset` into `target`
pub fn render_scrolled<F>(
    target: &mut Buffer,
    area: Rect,
    content_height: u16,
    offset: u16,
    draw: F,
) where
    F: FnOnce(&mut Buffer, Rect),
{
    if area.width == 0 || area.height == 0 {
        return;
    }

    let canvas_area = Rect::new(0, 0, area.width, content_height.max(area.height));
    let mut canvas = Buffer::empty(canvas_area);
    draw(&mut canvas, canvas_area);

    let offset = clamp_offset(offset, canvas_area.height, area.height);
    for y in 0..area.height {
        for x in 0..area.width {
            let Some(src) = canvas.cell((x, y + offset)) else {
                continue;
            };
            let src = src.clone();
            if let Some(dst) = target.cell_mut((area.x + x, area.y + y)) {
                *dst = src;
            }
        }
    }
}

/// `percent` of `value`, computed wide so large terminals cannot overflow
pub fn percent_of(value: u16, percent: u16) -> u16 {
    let scaled = u32::from(value) * u32::from(percent) / 100;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

/// Rect centered in `area`, sized by percentage with minimum cell sizes
pub fn centered_rect(percent_x: u16, min_width: u16, height: u16, area: Rect) -> Rect {
    let width = percent_of(area.width, percent_x).max(min_width).min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_stack_offsets() {
        assert_eq!(stack_offsets(&[3, 5, 2], 1), vec![0, 4, 10]);
        assert_eq!(stack_height(&[3, 5, 2], 1), 12);
        assert_eq!(stack_height(&[], 1), 0);
    }

    #[test]
    fn test_scroll_to_visible() {
        // Already visible
        assert_eq!(scroll_to_visible(0, 2, 3, 10), 0);
        // Below the viewport
        assert_eq!(scroll_to_visible(0, 12, 3, 10), 5);
        // Above the viewport
        assert_eq!(scroll_to_visible(8, 2, 3, 10), 2);
        // Taller than viewport
        assert_eq!(scroll_to_visible(0, 4, 20, 10), 4);
    }

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset(50, 30, 10), 20);
        assert_eq!(clamp_offset(5, 8, 10), 0);
    }

    #[test]
    fn test_place_shortest_lane() {
        let layout = StaggeredLayout::new(2, 1);
        let placements = layout.place(&[6, 4, 4, 5]);

        assert_eq!(placements[0], Placement { lane: 0, top: 0, height: 6 });
        assert_eq!(placements[1], Placement { lane: 1, top: 0, height: 4 });
        // Lane 1 ends at 5, lane 0 at 7
        assert_eq!(placements[2], Placement { lane: 1, top: 5, height: 4 });
        // Lane 0 ends at 7, lane 1 at 10
        assert_eq!(placements[3], Placement { lane: 0, top: 7, height: 5 });

        assert_eq!(StaggeredLayout::content_height(&placements), 12);
    }

    #[test]
    fn test_lane_geometry() {
        let layout = StaggeredLayout::new(2, 1);
        assert_eq!(layout.lane_width(42), 20);
        assert_eq!(layout.lane_x(0, 42), 0);
        assert_eq!(layout.lane_x(1, 42), 22);
        assert_eq!(StaggeredLayout::new(0, 1).columns, 1);
    }

    #[test]
    fn test_neighbor() {
        let layout = StaggeredLayout::new(2, 1);
        let placements = layout.place(&[6, 4, 4, 5]);

        assert_eq!(StaggeredLayout::neighbor(&placements, 0, Direction::Right), 1);
        assert_eq!(StaggeredLayout::neighbor(&placements, 3, Direction::Right), 2);
        assert_eq!(StaggeredLayout::neighbor(&placements, 2, Direction::Left), 3);
        assert_eq!(StaggeredLayout::neighbor(&placements, 0, Direction::Left), 0);
        assert_eq!(StaggeredLayout::neighbor(&placements, 1, Direction::Right), 1);
        assert_eq!(StaggeredLayout::neighbor(&placements, 3, Direction::Down), 3);
        assert_eq!(StaggeredLayout::neighbor(&placements, 3, Direction::Up), 2);
    }

    #[test]
    fn test_step() {
        assert_eq!(step(0, 3, Direction::Up), 0);
        assert_eq!(step(1, 3, Direction::Down), 2);
        assert_eq!(step(2, 3, Direction::Down), 2);
        assert_eq!(step(0, 0, Direction::Down), 0);
    }

    #[test]
    fn test_render_scrolled_copies_window() {
        let mut target = Buffer::empty(Rect::new(0, 0, 4, 2));
        render_scrolled(&mut target, Rect::new(0, 0, 4, 2), 5, 3, |buf, _| {
            for row in 0..5u16 {
                buf.set_string(0, row, row.to_string(), Style::default());
            }
        });

        assert_eq!(target.cell((0, 0)).unwrap().symbol(), "3");
        assert_eq!(target.cell((0, 1)).unwrap().symbol(), "4");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 30, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));

        let tiny = centered_rect(50, 30, 10, Rect::new(0, 0, 20, 5));
        assert_eq!(tiny.width, 20);
        assert_eq!(tiny.height, 5);
    }

    #[test]
    fn test_centered_rect_on_wide_area() {
        let rect = centered_rect(60, 40, 10, Rect::new(0, 0, 1100, 20));
        assert_eq!(rect.width, 660);
        assert_eq!(rect.x, 220);

        assert_eq!(percent_of(u16::MAX, 100), u16::MAX);
        assert_eq!(percent_of(1000, 70), 700);
    }
}
