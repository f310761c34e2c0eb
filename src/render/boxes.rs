//! Bounding-box overlay drawing
//!
//! Draws filled, outlined rectangles for detected elements directly onto a
//! mutable page canvas. Fills are alpha-blended over the existing pixels;
//! boxes are painted in encounter order, so later boxes overpaint earlier
//! ones where they overlap.

use crate::config::{RgbaColor, StyleMap};
use crate::document::ElementBox;
use super::coords::to_raster_rect;
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Draw element boxes onto the page canvas.
///
/// `page_height` is the PDF-space page height used for the Y flip; the
/// canvas is expected to be sized to the page dimensions. Style lookup never
/// fails (unknown labels use the default style), so every box is drawn.
pub fn draw_boxes(img: &mut RgbaImage, page_height: f64, boxes: &[ElementBox], styles: &StyleMap) {
    for element in boxes {
        let style = styles.style_for(&element.label);
        let (left, top, right, bottom) = to_raster_rect(&element.bbox, page_height);

        blend_filled_rect(img, left, top, right, bottom, style.fill);
        if style.outline.is_visible() {
            blend_frame(img, left, top, right, bottom, style.outline);
        }
    }
}

/// Draw a 1-px black border around the whole canvas
pub fn draw_page_border(img: &mut RgbaImage) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let rect = Rect::at(0, 0).of_size(width, height);
    draw_hollow_rect_mut(img, rect, Rgba([0, 0, 0, 255]));
}

/// Clamp an inclusive pixel range to the canvas extent along one axis
fn clamp_range(lo: i64, hi: i64, len: u32) -> Option<(u32, u32)> {
    if len == 0 || hi < 0 || lo >= len as i64 || hi < lo {
        return None;
    }
    let lo = lo.max(0) as u32;
    let hi = hi.min(len as i64 - 1) as u32;
    Some((lo, hi))
}

/// Alpha-blend a filled rectangle (inclusive pixel bounds) onto the canvas
fn blend_filled_rect(
    img: &mut RgbaImage,
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    color: RgbaColor,
) {
    if !color.is_visible() {
        return;
    }
    let (width, height) = img.dimensions();
    let Some((x0, x1)) = clamp_range(left, right, width) else {
        return;
    };
    let Some((y0, y1)) = clamp_range(top, bottom, height) else {
        return;
    };
    let rgba: Rgba<u8> = color.into();
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.get_pixel_mut(x, y).blend(&rgba);
        }
    }
}

/// Alpha-blend a 1-px rectangle outline; each pixel is touched once
fn blend_frame(
    img: &mut RgbaImage,
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    color: RgbaColor,
) {
    blend_filled_rect(img, left, top, right, top, color);
    if bottom > top {
        blend_filled_rect(img, left, bottom, right, bottom, color);
    }
    if bottom > top + 1 {
        blend_filled_rect(img, left, top + 1, left, bottom - 1, color);
        if right > left {
            blend_filled_rect(img, right, top + 1, right, bottom - 1, color);
        }
    }
}
