use std::fs;

use ab_glyph::{ Font as _, FontVec, PxScale, ScaleFont };
use log::debug;

/// Font files tried, in order, when rendering labels.
pub const FONT_CANDIDATES: &[&str] = &[
    "Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// Width and height of a built-in glyph, in cells.
const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;

/// A font that can rasterize label text.
pub enum Font {
    /// A TrueType/OpenType font found on disk.
    Outline(FontVec),

    /// The built-in 5x7 bitmap font.
    Builtin,
}

/// Finds a font for labels.
///
/// Each candidate is read and parsed in turn. If none work, the built-in font
/// is returned, so this never fails. Nothing is cached between calls.
pub fn resolve() -> Font {
    for candidate in FONT_CANDIDATES {
        let font = fs::read(candidate)
            .ok()
            .and_then(|bytes| FontVec::try_from_vec(bytes).ok());

        if let Some(font) = font {
            debug!("Using font {}", candidate);
            return Font::Outline(font);
        }
    }

    debug!("No font candidates found, using built-in font");
    Font::Builtin
}

impl Font {
    /// Rasterizes `text` at pixel size `size` with its top-left corner at
    /// (`x`, `y`).
    ///
    /// `plot` is called with a pixel position and a coverage in `0.0..=1.0`.
    /// Positions may fall outside the target surface.
    pub fn rasterize<F>(&self, x: f64, y: f64, text: &str, size: f64, mut plot: F)
    where
        F: FnMut(i64, i64, f64),
    {
        match self {
            Font::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size as f32));
                let mut caret = ab_glyph::point(x as f32, y as f32 + scaled.ascent());

                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    let glyph = id.with_scale_and_position(scaled.scale(), caret);
                    caret.x += scaled.h_advance(id);

                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|gx, gy, coverage| {
                            plot(bounds.min.x as i64 + gx as i64,
                                bounds.min.y as i64 + gy as i64,
                                coverage as f64);
                        });
                    }
                }
            },

            Font::Builtin => {
                let cell = builtin_cell(size);
                let mut caret = x.round() as i64;
                let top = y.round() as i64;

                for c in text.chars() {
                    if let Some(rows) = builtin_glyph(c) {
                        for (row, bits) in rows.iter().enumerate() {
                            for col in 0..GLYPH_COLS {
                                if bits & (0x10 >> col) == 0 {
                                    continue;
                                }

                                let px = caret + (col as i64) * cell;
                                let py = top + (row as i64) * cell;
                                for dy in 0..cell {
                                    for dx in 0..cell {
                                        plot(px + dx, py + dy, 1.0);
                                    }
                                }
                            }
                        }
                    }

                    caret += (GLYPH_COLS as i64 + 1) * cell;
                }
            }
        }
    }
}

/// Side length, in pixels, of one built-in glyph cell at `size`.
fn builtin_cell(size: f64) -> i64 {
    ((size / 10.0).round() as i64).max(1)
}

/// Rows of a built-in glyph, top to bottom. Bit 4 is the leftmost column.
///
/// Only the characters used by angle labels are covered; anything else
/// renders as blank space.
fn builtin_glyph(c: char) -> Option<[u8; GLYPH_ROWS]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '°' => [0x0C, 0x12, 0x12, 0x0C, 0x00, 0x00, 0x00],
        'θ' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x0E],
        _ => return None,
    };

    Some(rows)
}

#[test]
fn builtin_font_plots_within_cell_grid() {
    let mut plotted = Vec::new();
    Font::Builtin.rasterize(10.0, 20.0, "1", 20.0, |x, y, c| {
        plotted.push((x, y, c));
    });

    // Glyph '1' has 10 set cells, each 2x2 pixels at size 20
    assert_eq!(plotted.len(), 40);
    for (x, y, c) in plotted {
        assert!(x >= 10 && x < 20);
        assert!(y >= 20 && y < 34);
        assert_eq!(c, 1.0);
    }
}

#[test]
fn builtin_font_skips_unknown_characters() {
    let mut xs = Vec::new();
    Font::Builtin.rasterize(0.0, 0.0, "?1", 10.0, |x, _, _| xs.push(x));

    // '?' is blank but still advances the caret by one glyph width
    assert!(!xs.is_empty());
    assert!(xs.iter().all(|x| *x >= 6));
}

#[test]
fn resolve_always_yields_a_font() {
    let mut count = 0;
    resolve().rasterize(0.0, 0.0, "θ = 30°", 20.0, |_, _, c| {
        if c > 0.0 {
            count += 1;
        }
    });

    assert!(count > 0);
}
