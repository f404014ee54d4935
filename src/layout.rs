//! Figure layout arithmetic
//!
//! Rectangles are fractions of the figure with the origin at the bottom-left
//! corner. They only become screen rectangles when a frame is drawn.

use crate::constants::layout::*;
use egui::{Pos2, Rect, Vec2};

/// A rectangle in fractional figure coordinates: `[left, bottom, width, height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FracRect {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl FracRect {
    pub const fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    pub const fn from_array(r: [f32; 4]) -> Self {
        Self::new(r[0], r[1], r[2], r[3])
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }

    /// True when the two rectangles share interior area
    pub fn overlaps(&self, other: &FracRect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.bottom < other.top()
            && other.bottom < self.top()
    }

    /// Map onto a screen rectangle (egui's origin is top-left, so y flips)
    pub fn to_screen(&self, figure: Rect) -> Rect {
        let size = figure.size();
        let min = Pos2::new(
            figure.min.x + self.left * size.x,
            figure.min.y + (1.0 - self.top()) * size.y,
        );
        Rect::from_min_size(min, Vec2::new(self.width * size.x, self.height * size.y))
    }
}

/// Regions of the joint plot figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLayout {
    pub density: FracRect,
    pub hist_x: FracRect,
    pub hist_y: FracRect,
    pub colorbar: FracRect,
}

impl JointLayout {
    pub fn compute() -> Self {
        let bottom_h = JOINT_HEIGHT + JOINT_BOTTOM + MARGINAL_SEPARATION;
        let left_h = JOINT_WIDTH + JOINT_LEFT + MARGINAL_SEPARATION;

        Self {
            density: FracRect::new(JOINT_LEFT, JOINT_BOTTOM, JOINT_WIDTH, JOINT_HEIGHT),
            hist_x: FracRect::new(JOINT_LEFT, bottom_h, JOINT_WIDTH, MARGINAL_THICKNESS),
            hist_y: FracRect::new(left_h, JOINT_BOTTOM, MARGINAL_THICKNESS, JOINT_HEIGHT),
            colorbar: FracRect::new(
                COLORBAR_LEFT,
                JOINT_BOTTOM,
                COLORBAR_WIDTH,
                COLORBAR_EXTRA + JOINT_WIDTH,
            ),
        }
    }
}

/// Regions of the dynamic zoom figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLayout {
    pub overview: FracRect,
    pub detail: FracRect,
    pub center_slider: FracRect,
    pub width_slider: FracRect,
    pub reset_button: FracRect,
}

impl ZoomLayout {
    pub fn compute() -> Self {
        let [overview, detail] = stacked_rows(
            ZOOM_SUBPLOTS_LEFT,
            ZOOM_SUBPLOTS_RIGHT,
            ZOOM_SUBPLOTS_BOTTOM,
            ZOOM_SUBPLOTS_TOP,
            ZOOM_SUBPLOTS_HSPACE,
        );

        Self {
            overview,
            detail,
            center_slider: FracRect::from_array(CENTER_SLIDER),
            width_slider: FracRect::from_array(WIDTH_SLIDER),
            reset_button: FracRect::from_array(RESET_BUTTON),
        }
    }
}

/// Two rows in a single column, top row first; `hspace` is the gap as a
/// fraction of the row height
fn stacked_rows(left: f32, right: f32, bottom: f32, top: f32, hspace: f32) -> [FracRect; 2] {
    let row_height = (top - bottom) / (2.0 + hspace);
    let gap = hspace * row_height;
    let width = right - left;

    [
        FracRect::new(left, top - row_height, width, row_height),
        FracRect::new(left, top - 2.0 * row_height - gap, width, row_height),
    ]
}
