//! Keyboard navigation adapter. Arrow keys move the drag position to
//! the center of the nearest eligible target in that direction, so
//! keyboard reordering flows through the same engine as pointer drags.

use super::targets::{DragKind, DropTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

fn toward(direction: Direction, from: (f64, f64), to: (f64, f64)) -> bool {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    // The step axis must dominate, so a mostly-lateral target does not
    // capture a vertical arrow press (and vice versa).
    match direction {
        Direction::Up => dy < 0.0 && -dy > dx.abs(),
        Direction::Down => dy > 0.0 && dy > dx.abs(),
        Direction::Left => dx < 0.0 && -dx > dy.abs(),
        Direction::Right => dx > 0.0 && dx > dy.abs(),
    }
}

/// Synthetic coordinates for a keyboard step, or `None` when no
/// eligible target lies in that direction.
pub fn keyboard_coordinates(
    current: (f64, f64),
    direction: Direction,
    dragging: DragKind,
    targets: &[DropTarget],
) -> Option<(f64, f64)> {
    let mut best: Option<((f64, f64), f64)> = None;
    for target in targets {
        if dragging == DragKind::Column && target.kind != DragKind::Column {
            continue;
        }
        let center = target.rect.center();
        if !toward(direction, current, center) {
            continue;
        }
        let dx = center.0 - current.0;
        let dy = center.1 - current.1;
        let d = dx * dx + dy * dy;
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((center, d));
        }
    }
    best.map(|(center, _)| center)
}
