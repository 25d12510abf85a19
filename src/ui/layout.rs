use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Screen body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        body: chunks[1],
        status_bar: chunks[2],
    }
}

/// A `width` x `height` box centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Split `area` into stacked rows of the given heights, dropping any slack
/// into a trailing filler.
pub fn rows(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = heights.iter().map(|h| Constraint::Length(*h)).collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    chunks[..heights.len()].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_header_and_status() {
        let l = compute_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(l.header.height, 1);
        assert_eq!(l.status_bar.height, 1);
        assert_eq!(l.status_bar.y, 23);
        assert_eq!(l.body.height, 22);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let r = centered(Rect::new(0, 0, 40, 10), 60, 6);
        assert_eq!(r, Rect::new(0, 2, 40, 6));
    }

    #[test]
    fn test_rows_heights() {
        let r = rows(Rect::new(0, 0, 20, 20), &[3, 1, 3]);
        assert_eq!(r.len(), 3);
        assert_eq!(r[1].y, 3);
        assert_eq!(r[2].height, 3);
    }
}
