//! Rasterizer output properties
//!
//! Line count follows the thumbnail height, image rows share one width no
//! wider than the viewport, and output depends only on the inputs.

mod common;

use common::*;
use pixcat::color::ColorProfile;
use pixcat::render::{rasterize, RasterOptions, UPPER_HALF_BLOCK};

const VIEWPORTS: [(u16, u16); 6] = [(80, 24), (40, 40), (17, 9), (200, 60), (3, 3), (1, 50)];
const IMAGES: [(u32, u32); 5] = [(64, 64), (300, 40), (12, 90), (7, 3), (1, 1)];

#[test]
fn test_line_count_matches_thumbnail_height() {
    for (w, h) in IMAGES {
        let image = gradient_image(w, h);
        for (cols, rows) in VIEWPORTS {
            let options = RasterOptions::new(cols, rows, ColorProfile::TrueColor);
            let (max_w, max_h) = options.pixel_bounds();
            let rendering = rasterize(&image, &options, None);

            let image_rows = rendering.line_count() - 1;
            if w <= max_w && h <= max_h {
                // Fits: never upscaled
                assert_eq!(image_rows as u32, (h + 1) / 2, "{}x{} in {}x{}", w, h, cols, rows);
            } else {
                assert!(image_rows as u32 <= (max_h + 1) / 2, "{}x{} in {}x{}", w, h, cols, rows);
            }
        }
    }
}

#[test]
fn test_image_rows_share_one_width_within_viewport() {
    for (w, h) in IMAGES {
        let image = gradient_image(w, h);
        for (cols, rows) in VIEWPORTS {
            let options = RasterOptions::new(cols, rows, ColorProfile::TrueColor);
            let rendering = rasterize(&image, &options, Some("caption"));
            let widths = rendering.line_widths();
            let image_widths = &widths[..widths.len() - 1];

            if let Some(first) = image_widths.first() {
                assert!(image_widths.iter().all(|width| width == first));
                assert!(*first <= cols as usize, "{}x{} in {}x{}", w, h, cols, rows);
            }
        }
    }
}

#[test]
fn test_rasterizing_twice_is_identical() {
    let image = gradient_image(123, 77);
    let options = RasterOptions::new(50, 20, ColorProfile::Ansi256);

    let first = rasterize(&image, &options, Some("gradient"));
    let second = rasterize(&image, &options, Some("gradient"));
    assert_eq!(first, second);
    assert!(!first.ptr_eq(&second));
}

#[test]
fn test_every_image_cell_is_a_half_block() {
    let image = gradient_image(10, 10);
    let options = RasterOptions::new(10, 10, ColorProfile::TrueColor);
    let rendering = rasterize(&image, &options, None);

    let image_lines = &rendering.text().lines[..rendering.line_count() - 1];
    for line in image_lines {
        for span in &line.spans {
            assert_eq!(span.content, UPPER_HALF_BLOCK);
            assert!(span.style.fg.is_some());
            assert!(span.style.bg.is_some());
        }
    }
}

#[test]
fn test_color_tiers_share_layout() {
    let image = gradient_image(90, 60);
    let layouts: Vec<_> = [
        ColorProfile::TrueColor,
        ColorProfile::Ansi256,
        ColorProfile::Ansi16,
    ]
    .into_iter()
    .map(|profile| {
        let rendering = rasterize(&image, &RasterOptions::new(30, 15, profile), None);
        (rendering.line_widths(), rendering.plain_lines())
    })
    .collect();

    assert_eq!(layouts[0], layouts[1]);
    assert_eq!(layouts[1], layouts[2]);
}

#[test]
fn test_wide_image_is_centred() {
    let image = solid_image(10, 4, [255, 255, 255]);
    let options = RasterOptions::new(31, 10, ColorProfile::TrueColor);
    let rendering = rasterize(&image, &options, None);

    // (31 - 10 + 1) / 2 columns on the left
    let first = rendering.plain_lines()[0].clone();
    assert!(first.starts_with(&" ".repeat(11)));
    assert_eq!(first.chars().filter(|c| *c == '▀').count(), 10);
}
