use tessel_core::{Direction, Rect, WindowId};

/// Centre offset a window must exceed along the movement axis to count as
/// lying in that direction.
pub const DIRECTION_DEAD_ZONE: f32 = 10.0;

/// Find the window whose centre is nearest to `from`'s centre among those
/// lying in `direction`. Ties keep the first candidate in `rects` order.
pub fn nearest_in_direction(
    from: &str,
    direction: Direction,
    rects: &[(WindowId, Rect)],
) -> Option<WindowId> {
    let origin = rects.iter().find(|(id, _)| id == from)?.1.center();

    let mut best: Option<(&WindowId, f32)> = None;
    for (id, rect) in rects {
        if id == from {
            continue;
        }
        let center = rect.center();
        let dx = center.x - origin.x;
        let dy = center.y - origin.y;

        let in_direction = match direction {
            Direction::Left => dx < -DIRECTION_DEAD_ZONE,
            Direction::Right => dx > DIRECTION_DEAD_ZONE,
            Direction::Up => dy < -DIRECTION_DEAD_ZONE,
            Direction::Down => dy > DIRECTION_DEAD_ZONE,
        };
        if !in_direction {
            continue;
        }

        let dist = origin.distance(center);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((id, dist));
        }
    }

    best.map(|(id, _)| id.clone())
}
