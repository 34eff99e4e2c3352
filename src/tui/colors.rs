use std::collections::HashMap;
use std::sync::OnceLock;

use crossterm::style::Color;
use palette::{FromColor, Lch, Srgb};

use crate::engine::grid::Tile;

struct Colors {
    tile_colors: HashMap<Tile, (Color, Color)>,
}

static DEFAULT_COLORS: OnceLock<Colors> = OnceLock::new();

// One spin around the Lch hue wheel from 2 up to 2048, all tiles sharing a
// dark complementary foreground.
fn defaults() -> Colors {
    let bg_hue = 28.0;
    let fg_hue = bg_hue + 180.0;
    let mut tile_colors = HashMap::from_iter(
        (1..=11u32)
            .map(|i| {
                (
                    2u32.pow(i),
                    Lch::new(80.0, 90.0, i as f32 * 360.0 / 10.0),
                    Lch::new(20.0, 50.0, fg_hue),
                )
            })
            .map(|(value, bg_lch, fg_lch)| {
                (
                    value,
                    Srgb::from_color(bg_lch).into_format::<u8>(),
                    Srgb::from_color(fg_lch).into_format::<u8>(),
                )
            })
            .map(|(value, bg, fg)| {
                (
                    value,
                    (
                        Color::Rgb {
                            r: bg.red,
                            g: bg.green,
                            b: bg.blue,
                        },
                        Color::Rgb {
                            r: fg.red,
                            g: fg.green,
                            b: fg.blue,
                        },
                    ),
                )
            }),
    );
    // empty cells read as part of the board surface
    tile_colors.insert(
        0,
        (
            Color::Rgb {
                r: 58,
                g: 50,
                b: 44,
            },
            Color::Rgb {
                r: 58,
                g: 50,
                b: 44,
            },
        ),
    );
    Colors { tile_colors }
}

/// Background and foreground pair for a tile value. Values past 2048 share
/// one loud fallback.
pub(crate) fn tile_colors(value: Tile) -> (Color, Color) {
    DEFAULT_COLORS
        .get_or_init(defaults)
        .tile_colors
        .get(&value)
        .copied()
        .unwrap_or((
            Color::Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            Color::Rgb { r: 90, g: 0, b: 0 },
        ))
}
