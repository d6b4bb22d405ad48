//! Per-anchor limits for resizing the zoomed sprite.

use blue_core::draw::ZoomAnchor;

use super::{SCREEN_HEIGHT, SCREEN_WIDTH, SPRITE_HEIGHT, SPRITE_WIDTH};

/// Display extent limits and growth directions while an anchor is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomBoundary {
    /// Display width change per Right press.
    pub w_dir: i16,
    /// Display height change per Up press.
    pub h_dir: i16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl ZoomBoundary {
    pub fn contains_width(&self, width: i16) -> bool {
        (self.x_min..=self.x_max).contains(&width)
    }

    pub fn contains_height(&self, height: i16) -> bool {
        (self.y_min..=self.y_max).contains(&height)
    }
}

const SIDE_X_MAX: i16 = SCREEN_WIDTH / 2 + SPRITE_WIDTH / 2;
const EDGE_Y_MAX: i16 = SPRITE_HEIGHT + (SCREEN_HEIGHT - SPRITE_HEIGHT) / 2;

const fn boundary(w_dir: i16, h_dir: i16, x_max: i16, y_max: i16) -> ZoomBoundary {
    ZoomBoundary {
        w_dir,
        h_dir,
        x_min: 0,
        y_min: 0,
        x_max,
        y_max,
    }
}

/// Get the boundary for an anchor.
pub fn get_boundary(anchor: ZoomAnchor) -> ZoomBoundary {
    match anchor {
        ZoomAnchor::UpperLeft => boundary(1, -1, SIDE_X_MAX, EDGE_Y_MAX),
        ZoomAnchor::UpperCenter => boundary(1, -1, SCREEN_WIDTH, EDGE_Y_MAX),
        ZoomAnchor::UpperRight => boundary(-1, -1, SIDE_X_MAX, EDGE_Y_MAX),
        ZoomAnchor::CenterLeft => boundary(1, 1, SIDE_X_MAX, SCREEN_HEIGHT),
        ZoomAnchor::Center => boundary(1, -1, SCREEN_WIDTH, SCREEN_HEIGHT),
        ZoomAnchor::CenterRight => boundary(-1, -1, SIDE_X_MAX, SCREEN_HEIGHT),
        ZoomAnchor::LowerLeft => boundary(1, 1, SIDE_X_MAX, EDGE_Y_MAX),
        ZoomAnchor::LowerCenter => boundary(1, 1, SCREEN_WIDTH, EDGE_Y_MAX),
        ZoomAnchor::LowerRight => boundary(-1, 1, SIDE_X_MAX, EDGE_Y_MAX),
    }
}
