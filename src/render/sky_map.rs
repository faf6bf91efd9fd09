//! Sky map drawing using tiny-skia
//!
//! Every call repaints the whole surface. The drawing is a pure function
//! of its inputs and the surface size read at the start of the pass.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

use super::geometry::{anomaly, selection, star};
use crate::config::{MapColor, Theme};
use crate::domain::{ObjectId, ScanResult, ScreenPoint, SelectionRect, Size, View};
use crate::projection::Projection;

/// Pixel surface the sky map is drawn on
///
/// A zero-sized surface has no backing pixmap and draws nothing.
#[derive(Debug, Default)]
pub struct SkySurface {
    pixmap: Option<Pixmap>,
}

impl SkySurface {
    pub fn new(size: Size) -> Self {
        let mut surface = Self::default();
        surface.resize(size);
        surface
    }

    /// Reallocate the backing pixmap if the size changed
    pub fn resize(&mut self, size: Size) {
        let (w, h) = pixel_dims(size);
        if self.pixmap.as_ref().map(|p| (p.width(), p.height())) == Some((w, h)) {
            return;
        }
        self.pixmap = Pixmap::new(w, h);
        if self.pixmap.is_none() {
            log::debug!("Surface resized to empty area {}x{}", w, h);
        }
    }

    /// Current pixel size
    pub fn size(&self) -> Size {
        self.pixmap
            .as_ref()
            .map(|p| Size::new(p.width() as f64, p.height() as f64))
            .unwrap_or_default()
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Copy the surface into a straight-alpha RGBA image
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let pixmap = self.pixmap.as_ref()?;
        let mut raw = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
    }

    /// Write the surface to a PNG file
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = self.to_rgba_image().context("Surface has no pixels to save")?;
        img.save(path)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        Ok(())
    }
}

fn pixel_dims(size: Size) -> (u32, u32) {
    if size.is_empty() {
        return (0, 0);
    }
    (size.width.round() as u32, size.height.round() as u32)
}

/// Everything one repaint depends on
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub view: &'a View,
    pub result: Option<&'a ScanResult>,
    pub selection: Option<SelectionRect>,
    pub highlighted: Option<&'a ObjectId>,
    pub theme: &'a Theme,
}

fn paint(color: MapColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn paint_with_alpha(color: MapColor, alpha: u8) -> Paint<'static> {
    let [r, g, b, _] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, alpha);
    paint.anti_alias = true;
    paint
}

/// Build a closed axis-aligned rectangle path
fn rect_path(x: f32, y: f32, width: f32, height: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x, y);
    pb.line_to(x + width, y);
    pb.line_to(x + width, y + height);
    pb.line_to(x, y + height);
    pb.close();
    pb.finish()
}

/// Draw field stars as filled discs with a soft halo
fn draw_stars(pixmap: &mut Pixmap, result: &ScanResult, projection: &Projection, theme: &Theme) {
    for field_star in &result.field_stars {
        let ScreenPoint { x, y } = projection.project(field_star.coord());
        let (x, y) = (x as f32, y as f32);
        let radius = star::radius(field_star.mag) as f32;

        if let Some(glow) = PathBuilder::from_circle(x, y, radius + star::GLOW) {
            let halo = paint_with_alpha(theme.star, star::GLOW_ALPHA);
            pixmap.fill_path(&glow, &halo, FillRule::Winding, Transform::identity(), None);
        }

        let Some(disc) = PathBuilder::from_circle(x, y, radius) else {
            continue;
        };
        let color = theme.star.with_alpha(star::opacity(field_star.mag) as f32);
        pixmap.fill_path(&disc, &paint(color), FillRule::Winding, Transform::identity(), None);
    }
}

/// Draw anomaly markers as outlined squares
fn draw_anomalies(
    pixmap: &mut Pixmap,
    result: &ScanResult,
    projection: &Projection,
    highlighted: Option<&ObjectId>,
    theme: &Theme,
) {
    let half = (anomaly::SIZE / 2.0) as f32;
    let side = anomaly::SIZE as f32;

    for item in &result.anomalies {
        let ScreenPoint { x, y } = projection.project(item.coord());
        let Some(path) = rect_path(x as f32 - half, y as f32 - half, side, side) else {
            continue;
        };

        let is_highlighted = highlighted == Some(&item.id);
        let (color, width, glow_alpha) = if is_highlighted {
            (
                theme.highlight,
                anomaly::HIGHLIGHT_THICKNESS,
                anomaly::HIGHLIGHT_GLOW_ALPHA,
            )
        } else {
            (theme.anomaly, anomaly::THICKNESS, anomaly::GLOW_ALPHA)
        };

        // Glow first, then the crisp stroke on top
        let glow = Stroke {
            width: width + anomaly::GLOW,
            line_cap: LineCap::Square,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        pixmap.stroke_path(
            &path,
            &paint_with_alpha(color, glow_alpha),
            &glow,
            Transform::identity(),
            None,
        );

        let stroke = Stroke {
            width,
            line_cap: LineCap::Square,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }
}

/// Draw the in-progress selection as a dashed outline
fn draw_selection(pixmap: &mut Pixmap, rect: SelectionRect, theme: &Theme) {
    let Some(path) = rect_path(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    ) else {
        return;
    };

    let stroke = Stroke {
        width: selection::THICKNESS,
        dash: StrokeDash::new(vec![selection::DASH, selection::DASH], 0.0),
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint(theme.selection), &stroke, Transform::identity(), None);
}

/// Repaint the whole sky map
///
/// Stars are drawn first, anomalies on top so they are never hidden,
/// and the selection outline last.
pub fn draw_sky_map(surface: &mut SkySurface, input: &RenderInput<'_>) {
    let size = surface.size();
    let Some(pixmap) = surface.pixmap.as_mut() else {
        return;
    };

    let [r, g, b, a] = input.theme.background.to_rgba_u8();
    pixmap.fill(Color::from_rgba8(r, g, b, a));

    let projection = Projection::new(input.view, size);

    if let Some(result) = input.result {
        draw_stars(pixmap, result, &projection, input.theme);
        draw_anomalies(pixmap, result, &projection, input.highlighted, input.theme);
    }

    if let Some(rect) = input.selection {
        draw_selection(pixmap, rect, input.theme);
    }
}
