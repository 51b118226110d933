//! Drop-target geometry and collision detection

/// What is being dragged, or what a drop target accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Column,
    Card,
}

/// Axis-aligned bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One droppable region. `id` is the column or card id it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub id: String,
    pub kind: DragKind,
    pub rect: Rect,
}

impl DropTarget {
    pub fn new(id: impl Into<String>, kind: DragKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
        }
    }
}

fn distance_squared(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Nearest-center eligible target for the given pointer position.
/// Column drags only ever land on column targets; card drags may land
/// on card or column targets. Strict comparison keeps the earliest of
/// equally distant targets.
pub fn nearest_target<'a>(
    point: (f64, f64),
    dragging: DragKind,
    targets: &'a [DropTarget],
) -> Option<&'a DropTarget> {
    let mut best: Option<(&DropTarget, f64)> = None;
    for target in targets {
        if dragging == DragKind::Column && target.kind != DragKind::Column {
            continue;
        }
        let d = distance_squared(point, target.rect.center());
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((target, d));
        }
    }
    best.map(|(target, _)| target)
}
