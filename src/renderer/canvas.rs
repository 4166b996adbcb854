//! Canvas 2D painter for draw lists

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{DrawCommand, TextAlign};
use crate::css_color;
use crate::sim::Rect;

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// Paints draw lists onto a 2D context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    /// Device pixels per playfield unit
    scale: f64,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, scale: f64) -> Self {
        Self { ctx, scale }
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn paint(&self, commands: &[DrawCommand]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)?;

        for command in commands {
            match command {
                DrawCommand::Clear { color } => {
                    let canvas_w = ctx.canvas().map(|c| c.width()).unwrap_or(0) as f64;
                    let canvas_h = ctx.canvas().map(|c| c.height()).unwrap_or(0) as f64;
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(0.0, 0.0, canvas_w / self.scale, canvas_h / self.scale);
                }
                DrawCommand::Rect { rect, color, alpha } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(
                        rect.x as f64,
                        rect.y as f64,
                        rect.width as f64,
                        rect.height as f64,
                    );
                    ctx.set_global_alpha(1.0);
                }
                DrawCommand::RoundedRect {
                    rect,
                    radius,
                    color,
                    outline,
                } => {
                    self.rounded_rect_path(rect, *radius)?;
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill();
                    if let Some(outline) = outline {
                        ctx.set_line_width(1.0);
                        ctx.set_stroke_style_str(&css_color(*outline));
                        ctx.stroke();
                    }
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill();
                }
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    color,
                    align,
                } => {
                    ctx.set_font(&format!("bold {}px {}", size, FONT_FAMILY));
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                        TextAlign::Right => "right",
                    });
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        Ok(())
    }

    fn rounded_rect_path(&self, rect: &Rect, radius: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0) as f64;
        let (x, y) = (rect.x as f64, rect.y as f64);
        let (right, bottom) = (rect.right() as f64, rect.bottom() as f64);

        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(right, y, right, bottom, r)?;
        ctx.arc_to(right, bottom, x, bottom, r)?;
        ctx.arc_to(x, bottom, x, y, r)?;
        ctx.arc_to(x, y, right, y, r)?;
        ctx.close_path();
        Ok(())
    }
}
