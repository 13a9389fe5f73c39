//! Draws bodies onto an HTML canvas with a fading trail and outline glow

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::settings::SimConfig;
use crate::sim::Body;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    /// CSS fill for the per-frame fade overlay
    fade_style: String,
    glow_blur: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, config: &SimConfig) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            fade_style: format!("rgba(0, 0, 0, {})", config.trail_fade),
            glow_blur: config.glow_blur as f64,
        })
    }

    /// Fill the surface with opaque black
    pub fn clear(&self) {
        self.ctx.set_fill_style_str("#000000");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    /// Draw one frame: translucent overlay (leaves trails), then every body
    pub fn draw(&self, bodies: &[Body]) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&self.fade_style);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        for body in bodies {
            self.draw_body(body)?;
        }
        Ok(())
    }

    fn draw_body(&self, body: &Body) -> Result<(), JsValue> {
        let color = body.color.to_hex();
        let (x, y, r) = (body.pos.x as f64, body.pos.y as f64, body.radius as f64);

        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, TAU)?;
        self.ctx.set_fill_style_str(&color);
        self.ctx.fill();
        self.ctx.close_path();

        // Glow
        self.ctx.set_shadow_color(&color);
        self.ctx.set_shadow_blur(self.glow_blur);
        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, TAU)?;
        self.ctx.set_stroke_style_str(&color);
        self.ctx.set_line_width(2.0);
        self.ctx.stroke();
        self.ctx.close_path();
        self.ctx.set_shadow_blur(0.0);
        Ok(())
    }
}
