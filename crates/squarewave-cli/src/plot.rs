//! Signal comparison plot renderer.
//!
//! Draws the noised signal and the filtered signal as two stacked line plots
//! over a shared `0..n` time axis, each with its y range fixed to `0..=255`.
//! Output is a deterministic RGB PNG.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use squarewave_signal::config::{Y_MAX, Y_MIN};
use squarewave_signal::SignalPair;
use std::io::Write;

/// Plot image width.
pub const PLOT_WIDTH: u32 = 1024;
/// Height of each of the two panels.
pub const PANEL_HEIGHT: u32 = 256;
/// Gap between the panels.
pub const PANEL_GAP: u32 = 8;

/// Caption of the upper panel.
pub const NOISED_TITLE: &str = "Signal with noise";
/// Caption of the lower panel.
pub const FILTERED_TITLE: &str = "Filtered signal";

const BACKGROUND_COLOR: [u8; 3] = [32, 32, 32]; // Dark gray background
const GRID_COLOR: [u8; 3] = [64, 64, 64]; // Midline and separator
const NOISED_COLOR: [u8; 3] = [64, 192, 255]; // Cyan/blue
const FILTERED_COLOR: [u8; 3] = [255, 128, 64]; // Orange

/// Result of plot rendering.
#[derive(Debug)]
pub struct PlotResult {
    /// PNG image data.
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of the PNG data.
    pub hash: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Total image height for two panels and the gap between them.
pub fn plot_height() -> u32 {
    PANEL_HEIGHT * 2 + PANEL_GAP
}

/// Renders the pair as a two-panel PNG.
pub fn render_plot_png(pair: &SignalPair) -> Result<PlotResult, png::EncodingError> {
    let width = PLOT_WIDTH;
    let height = plot_height();
    let rgb = render_panels(&pair.noised, &pair.filtered, width, height);

    let mut png_data = Vec::new();
    encode_png_to_writer(&rgb, width, height, &mut png_data)?;
    let hash = blake3::hash(&png_data).to_hex().to_string();

    Ok(PlotResult {
        png_data,
        hash,
        width,
        height,
    })
}

/// Draws both panels into an RGB buffer.
fn render_panels(noised: &[u8], filtered: &[u8], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let panel_h = PANEL_HEIGHT as usize;
    let lower_top = panel_h + PANEL_GAP as usize;

    let mut buffer = Vec::with_capacity(w * h * 3);
    for _ in 0..w * h {
        buffer.extend_from_slice(&BACKGROUND_COLOR);
    }

    // Separator band between the panels
    for y in panel_h..lower_top {
        for x in 0..w {
            put_pixel(&mut buffer, w, x, y, GRID_COLOR);
        }
    }

    for top in [0, lower_top] {
        let mid_y = top + value_to_y((Y_MAX as u16 + Y_MIN as u16) as f32 / 2.0, panel_h);
        for x in 0..w {
            put_pixel(&mut buffer, w, x, mid_y, GRID_COLOR);
        }
    }

    draw_series(&mut buffer, w, 0, panel_h, noised, NOISED_COLOR);
    draw_series(&mut buffer, w, lower_top, panel_h, filtered, FILTERED_COLOR);

    buffer
}

/// Draws one signal as a polyline inside the panel starting at row `top`.
fn draw_series(
    buffer: &mut [u8],
    width: usize,
    top: usize,
    panel_h: usize,
    samples: &[u8],
    color: [u8; 3],
) {
    let n = samples.len();
    if n == 0 {
        return;
    }

    let point = |i: usize| {
        (
            sample_to_x(i, n, width),
            top + value_to_y(samples[i] as f32, panel_h),
        )
    };

    if n == 1 {
        let (_, y) = point(0);
        for x in 0..width {
            put_pixel(buffer, width, x, y, color);
        }
        return;
    }

    for i in 1..n {
        let (x0, y0) = point(i - 1);
        let (x1, y1) = point(i);
        draw_line(buffer, width, (x0, y0), (x1, y1), color);
    }
}

/// Maps sample index `i` of `n` onto `0..width`, first and last at the edges.
fn sample_to_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let x = (i as f64 * (width - 1) as f64 / (n - 1) as f64).round() as usize;
    x.min(width - 1)
}

/// Maps a value in `Y_MIN..=Y_MAX` to a row in `0..panel_h`, `Y_MAX` on top.
fn value_to_y(value: f32, panel_h: usize) -> usize {
    let lo = Y_MIN as f32;
    let hi = Y_MAX as f32;
    let normalized = (hi - value.clamp(lo, hi)) / (hi - lo);
    let y = (normalized * (panel_h - 1) as f32).round() as usize;
    y.min(panel_h - 1)
}

/// Bresenham line between two pixel coordinates, endpoints included.
fn draw_line(
    buffer: &mut [u8],
    width: usize,
    from: (usize, usize),
    to: (usize, usize),
    color: [u8; 3],
) {
    let (mut x, mut y) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel(buffer, width, x as usize, y as usize, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put_pixel(buffer: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let idx = (y * width + x) * 3;
    if idx + 2 < buffer.len() {
        buffer[idx..idx + 3].copy_from_slice(&color);
    }
}

/// Encodes RGB buffer as PNG to a writer.
fn encode_png_to_writer<W: Write>(
    rgb_data: &[u8],
    width: u32,
    height: u32,
    writer: W,
) -> Result<(), png::EncodingError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    // Use fixed compression settings for determinism
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(rgb_data)?;

    Ok(())
}

/// Computes the default plot path from the noised signal path.
///
/// Given "out/noised.bin", returns "out/noised.plot.png".
pub fn plot_path_from_noised(noised_path: &str) -> String {
    let file_start = noised_path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match noised_path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => format!("{}.plot.png", &noised_path[..file_start + dot]),
        _ => format!("{}.plot.png", noised_path),
    }
}
