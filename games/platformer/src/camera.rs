use ledge_engine::{Rect, Viewport};

use crate::config::ViewportMargins;

/// Scroll the viewport so the player stays inside the margins.
///
/// Each edge is checked on its own against the viewport as it was on entry;
/// every triggered edge shifts the offset by exactly the overshoot. The
/// result is floored to whole units.
pub fn update_viewport(player: Rect, viewport: Viewport, margins: &ViewportMargins) -> Viewport {
    let mut left = viewport.left as f32;
    let mut bottom = viewport.bottom as f32;
    let view_left = left;
    let view_bottom = bottom;

    let left_boundary = view_left + margins.left;
    if player.left < left_boundary {
        left -= left_boundary - player.left;
    }

    let right_boundary = view_left + viewport.width - margins.right;
    if player.right > right_boundary {
        left += player.right - right_boundary;
    }

    let top_boundary = view_bottom + viewport.height - margins.top;
    if player.top > top_boundary {
        bottom += player.top - top_boundary;
    }

    let bottom_boundary = view_bottom + margins.bottom;
    if player.bottom < bottom_boundary {
        bottom -= bottom_boundary - player.bottom;
    }

    Viewport {
        left: left.floor() as i32,
        bottom: bottom.floor() as i32,
        ..viewport
    }
}
