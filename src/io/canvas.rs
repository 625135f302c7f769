//! Raster drawing on an RGBA image with data-to-pixel axis mapping
//!
//! Every primitive clips to the image, so callers can draw partly outside it.

use crate::io::configuration::{LABEL_GAP, LEGEND_SPACING, LINEAR_TICKS, TICK_LENGTH};
use crate::io::ensure_parent_dir;
use crate::io::error::{EddyError, Result};
use crate::io::glyphs::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, text_width};
use image::{Rgba, RgbaImage};
use std::path::Path;

const MAX_TICK_DECIMALS: i32 = 3;

/// Mix `over` onto `under` with opacity `alpha` in `[0, 1]`
pub fn blend(over: [u8; 4], under: [u8; 4], alpha: f64) -> [u8; 4] {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut mixed = [0u8; 4];
    for ((channel, &top), &bottom) in mixed.iter_mut().zip(&over).zip(&under) {
        *channel = f64::from(top)
            .mul_add(alpha, f64::from(bottom) * (1.0 - alpha))
            .round() as u8;
    }
    mixed
}

/// Mapping of data values onto `[0, 1]` along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Value mapped to 0
    pub min: f64,
    /// Value mapped to 1
    pub max: f64,
    /// Logarithmic spacing
    pub log: bool,
}

impl Scale {
    /// Linear axis
    pub const fn linear(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            log: false,
        }
    }

    /// Base-10 logarithmic axis, bounds must be positive
    pub const fn log(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            log: true,
        }
    }

    /// Position of `value` along the axis, `None` when it cannot be placed
    pub fn fraction(&self, value: f64) -> Option<f64> {
        let (value, min, max) = if self.log {
            if value <= 0.0 || self.min <= 0.0 || self.max <= 0.0 {
                return None;
            }
            (value.log10(), self.min.log10(), self.max.log10())
        } else {
            (value, self.min, self.max)
        };

        let span = max - min;
        (value.is_finite() && span.is_finite() && span != 0.0).then(|| (value - min) / span)
    }

    /// Tick positions: decades for log axes, evenly spaced values otherwise
    pub fn ticks(&self) -> Vec<f64> {
        if self.log {
            if self.min <= 0.0 || self.max <= self.min {
                return Vec::new();
            }
            let first = self.min.log10().ceil() as i32;
            let last = self.max.log10().floor() as i32;
            (first..=last).map(|exponent| 10f64.powi(exponent)).collect()
        } else {
            let step = (self.max - self.min) / LINEAR_TICKS as f64;
            (0..=LINEAR_TICKS)
                .map(|i| step.mul_add(i as f64, self.min))
                .collect()
        }
    }

    /// Text for a tick at `value`
    ///
    /// Log ticks between 0.01 and 1000 read as plain numbers and as powers of ten
    /// beyond. Linear ticks carry as many decimals as the tick step needs, up to
    /// three.
    pub fn label(&self, value: f64) -> String {
        if self.log {
            let exponent = value.log10().round() as i32;
            if (0..=3).contains(&exponent) {
                format!("{value:.0}")
            } else if (-2..0).contains(&exponent) {
                let precision = exponent.unsigned_abs() as usize;
                format!("{value:.precision$}")
            } else {
                format!("1E{exponent}")
            }
        } else {
            let step = (self.max - self.min).abs() / LINEAR_TICKS as f64;
            let precision = (0..=MAX_TICK_DECIMALS)
                .find(|&decimals| {
                    let scaled = step * 10f64.powi(decimals);
                    (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0)
                })
                .unwrap_or(MAX_TICK_DECIMALS) as usize;
            // Keeps "-0" off the axis
            let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
            format!("{value:.precision$}")
        }
    }
}

/// Pixel rectangle holding the plotted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    /// Left edge
    pub left: u32,
    /// Top edge
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Image with a plot area and one scale per axis
pub struct Canvas {
    image: RgbaImage,
    area: PlotArea,
    x_scale: Scale,
    y_scale: Scale,
}

impl Canvas {
    /// Blank canvas, the plot area is inset by `margin` on every side
    pub fn new(
        width: u32,
        height: u32,
        margin: u32,
        background: [u8; 4],
        x_scale: Scale,
        y_scale: Scale,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let margin = margin.min(width.saturating_sub(1) / 2).min(height.saturating_sub(1) / 2);

        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background)),
            area: PlotArea {
                left: margin,
                top: margin,
                width: width - 2 * margin,
                height: height - 2 * margin,
            },
            x_scale,
            y_scale,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Plot area in pixels
    pub const fn area(&self) -> PlotArea {
        self.area
    }

    /// Colour at a pixel, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Borrow the rendered image
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the rendered image
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel position of a data point, `None` when a scale cannot place it
    pub fn to_pixel(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        let fx = self.x_scale.fraction(x)?;
        let fy = self.y_scale.fraction(y)?;
        let px = fx.mul_add(f64::from(self.area.width), f64::from(self.area.left));
        let py = (1.0 - fy).mul_add(f64::from(self.area.height), f64::from(self.area.top));
        Some((px.round() as i64, py.round() as i64))
    }

    /// Set a pixel, ignoring positions outside the image
    pub fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
                *pixel = Rgba(color);
            }
        }
    }

    /// Straight pixel line using Bresenham's algorithm
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), color: [u8; 4]) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.put(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += sx;
            }
            if doubled <= dx {
                error += dx;
                y += sy;
            }
        }
    }

    /// Filled rectangle between two corners, both included
    pub fn fill_rect(&mut self, corner: (i64, i64), opposite: (i64, i64), color: [u8; 4]) {
        let (x0, x1) = (corner.0.min(opposite.0), corner.0.max(opposite.0));
        let (y0, y1) = (corner.1.min(opposite.1), corner.1.max(opposite.1));
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i64::from(self.width()) - 1);
        let y1 = y1.min(i64::from(self.height()) - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Filled axis-aligned ellipse blended over the current pixels
    pub fn fill_ellipse(
        &mut self,
        center: (i64, i64),
        radii: (f64, f64),
        color: [u8; 4],
        alpha: f64,
    ) {
        let rx = radii.0.max(0.5);
        let ry = radii.1.max(0.5);
        let x_reach = rx.ceil() as i64;
        let y_reach = ry.ceil() as i64;

        for dy in -y_reach..=y_reach {
            for dx in -x_reach..=x_reach {
                let nx = dx as f64 / rx;
                let ny = dy as f64 / ry;
                if nx.mul_add(nx, ny * ny) > 1.0 {
                    continue;
                }
                let (x, y) = (center.0 + dx, center.1 + dy);
                if let (Ok(ux), Ok(uy)) = (u32::try_from(x), u32::try_from(y)) {
                    if let Some(pixel) = self.image.get_pixel_mut_checked(ux, uy) {
                        *pixel = Rgba(blend(color, pixel.0, alpha));
                    }
                }
            }
        }
    }

    /// Polyline through data points, breaking wherever a point cannot be placed
    pub fn plot_line(&mut self, points: &[(f64, f64)], color: [u8; 4]) {
        let mut previous: Option<(i64, i64)> = None;
        for &(x, y) in points {
            let current = self.to_pixel(x, y);
            if let (Some(from), Some(to)) = (previous, current) {
                self.line(from, to, color);
            } else if let Some(point) = current {
                self.put(point.0, point.1, color);
            }
            previous = current;
        }
    }

    /// Vertical bar from the bottom of the plot area up to `height` in data units
    pub fn bar(&mut self, x_low: f64, x_high: f64, height: f64, color: [u8; 4]) {
        let bottom = i64::from(self.area.top + self.area.height);
        let (Some((left, top)), Some((right, _))) =
            (self.to_pixel(x_low, height), self.to_pixel(x_high, height))
        else {
            return;
        };
        if top < bottom {
            self.fill_rect((left, top), (right - 1, bottom - 1), color);
        }
    }

    /// Dashed vertical line across the plot area at data position `x`
    pub fn vertical_marker(&mut self, x: f64, color: [u8; 4]) {
        let Some(fx) = self.x_scale.fraction(x) else {
            return;
        };
        if !(0.0..=1.0).contains(&fx) {
            return;
        }
        let px = fx
            .mul_add(f64::from(self.area.width), f64::from(self.area.left))
            .round() as i64;
        let top = i64::from(self.area.top);
        let bottom = i64::from(self.area.top + self.area.height);
        for y in top..bottom {
            // 6 on, 4 off
            if (y - top) % 10 < 6 {
                self.put(px, y, color);
            }
        }
    }

    /// Write `text` with its top-left corner at `origin`
    pub fn text(&mut self, origin: (i64, i64), text: &str, color: [u8; 4]) {
        let mut x = origin.0;
        for c in text.chars() {
            for (row, bits) in (0..).zip(glyph(c)) {
                for column in 0..GLYPH_WIDTH {
                    if bits & (0x10 >> column) != 0 {
                        self.put(x + i64::from(column), origin.1 + row, color);
                    }
                }
            }
            x += i64::from(GLYPH_ADVANCE);
        }
    }

    /// Axis titles: `x_title` centred below the tick labels, `y_title` above the plot area
    pub fn draw_titles(&mut self, x_title: &str, y_title: &str, color: [u8; 4]) {
        let left = i64::from(self.area.left);
        let top = i64::from(self.area.top);
        let bottom = i64::from(self.area.top + self.area.height);
        let center = i64::from(self.area.left + self.area.width / 2);
        let below = i64::from(TICK_LENGTH + 3 * LABEL_GAP + GLYPH_HEIGHT);

        self.text(
            (center - i64::from(text_width(x_title) / 2), bottom + below),
            x_title,
            color,
        );
        self.text(
            (left, top - i64::from(GLYPH_HEIGHT + 2 * LABEL_GAP)),
            y_title,
            color,
        );
    }

    /// Colour swatch and name per entry, right-aligned above the plot area
    pub fn draw_legend(&mut self, entries: &[(&str, [u8; 4])], color: [u8; 4]) {
        let swatch = i64::from(GLYPH_HEIGHT);
        let gap = i64::from(LABEL_GAP);
        let spacing = i64::from(LEGEND_SPACING);
        let total: i64 = entries
            .iter()
            .map(|(name, _)| swatch + gap + i64::from(text_width(name)) + spacing)
            .sum();

        let right = i64::from(self.area.left + self.area.width);
        let y = i64::from(self.area.top) - swatch - 2 * gap;
        let mut x = right - total + spacing;
        for &(name, swatch_color) in entries {
            self.fill_rect((x, y), (x + swatch - 1, y + swatch - 1), swatch_color);
            self.text((x + swatch + gap, y), name, color);
            x += swatch + gap + i64::from(text_width(name)) + spacing;
        }
    }

    /// Frame around the plot area with labelled tick marks on the bottom and left edges
    pub fn draw_axes(&mut self, color: [u8; 4]) {
        let left = i64::from(self.area.left);
        let top = i64::from(self.area.top);
        let right = i64::from(self.area.left + self.area.width);
        let bottom = i64::from(self.area.top + self.area.height);
        let tick = i64::from(TICK_LENGTH);
        let gap = i64::from(LABEL_GAP);

        self.line((left, top), (right, top), color);
        self.line((right, top), (right, bottom), color);
        self.line((right, bottom), (left, bottom), color);
        self.line((left, bottom), (left, top), color);

        for value in self.x_scale.ticks() {
            if let Some(fx) = self.x_scale.fraction(value) {
                let px = fx
                    .mul_add(f64::from(self.area.width), f64::from(self.area.left))
                    .round() as i64;
                self.line((px, bottom), (px, bottom + tick), color);
                let label = self.x_scale.label(value);
                let half = i64::from(text_width(&label) / 2);
                self.text((px - half, bottom + tick + gap), &label, color);
            }
        }
        for value in self.y_scale.ticks() {
            if let Some(fy) = self.y_scale.fraction(value) {
                let py = (1.0 - fy)
                    .mul_add(f64::from(self.area.height), f64::from(self.area.top))
                    .round() as i64;
                self.line((left - tick, py), (left, py), color);
                let label = self.y_scale.label(value);
                let width = i64::from(text_width(&label));
                let half_height = i64::from(GLYPH_HEIGHT / 2);
                self.text((left - tick - gap - width, py - half_height), &label, color);
            }
        }
    }

    /// Save the canvas as PNG, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the image cannot be saved
    pub fn save_png(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| EddyError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
