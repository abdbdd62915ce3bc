//! The Canvas2D render pipeline, in strict back-to-front order: vignette and
//! theme backdrop, lattice frame, dyad wave curves, constellation edges,
//! connective lines, particle sprites, pointer overlays.

pub(crate) mod backdrops;
mod helpers;

use crate::render::helpers::{hash01, rgba, shifted};
use app_core::constants::{
    ATTRACTION_RADIUS, FAST_DRAG_SPEED, REPULSION_RADIUS, TRAIL_LIFE,
};
use app_core::{wave_profile, Backdrop, FieldEngine, FrameInput, ParticleKind};
use glam::Vec2;
use std::f32::consts::TAU;
use web_sys as web;

pub struct Painter {
    ctx: web::CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn render(
        &self,
        engine: &FieldEngine,
        input: &FrameInput,
        backdrop: Backdrop,
        elapsed: f32,
        size: (f64, f64, f64),
    ) {
        let (w64, h64, dpr) = size;
        let (w, h) = (w64 as f32, h64 as f32);
        let ctx = &self.ctx;
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, w64, h64);

        let color = input.theme.color();
        self.draw_vignette(w, h, input.scroll);
        backdrops::draw(ctx, backdrop, color, elapsed, input.scroll, input.pulse, w, h);
        self.draw_lattice_frame(w, h, elapsed, input.scroll);
        self.draw_dyads(engine, color);
        self.draw_constellation_edges(engine, color);
        self.draw_links(engine, input, color);
        self.draw_particles(engine, color);
        self.draw_pointer(engine, color);
    }

    /// Soft radial wash whose depth follows the page scroll.
    fn draw_vignette(&self, w: f32, h: f32, scroll: f32) {
        let ctx = &self.ctx;
        let depth = 0.18 + scroll * 0.22;
        if let Ok(vg) = ctx.create_radial_gradient(
            (w * 0.45) as f64,
            (h * 0.22) as f64,
            40.0,
            (w * 0.5) as f64,
            (h * 0.52) as f64,
            (w.max(h) * 0.85) as f64,
        ) {
            let _ = vg.add_color_stop(0.0, &rgba(127.0, 180.0, 255.0, 0.1 + depth * 0.06));
            let _ = vg.add_color_stop(0.45, &rgba(20.0, 30.0, 70.0, 0.03 + depth * 0.04));
            let _ = vg.add_color_stop(1.0, "rgba(0,0,0,0)");
            ctx.set_fill_style_canvas_gradient(&vg);
            ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
        }
    }

    /// Inset frame plus a few shimmer specks; positions hash off elapsed time
    /// so the pipeline stays deterministic.
    fn draw_lattice_frame(&self, w: f32, h: f32, elapsed: f32, scroll: f32) {
        let ctx = &self.ctx;
        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str(&rgba(127.0, 180.0, 255.0, 0.06 + scroll * 0.1));
        ctx.begin_path();
        ctx.move_to(26.0, 24.0);
        ctx.line_to((w - 26.0) as f64, 24.0);
        ctx.line_to((w - 26.0) as f64, (h - 24.0) as f64);
        ctx.line_to(26.0, (h - 24.0) as f64);
        ctx.close_path();
        ctx.stroke();

        ctx.set_fill_style_str("rgba(255,255,255,0.03)");
        let tick = (elapsed * 8.0).floor();
        for k in 0..4 {
            let x = hash01(tick * 12.9898 + k as f32 * 78.233) * w;
            let y = hash01(tick * 39.346 + k as f32 * 11.135) * h;
            ctx.fill_rect(x as f64, y as f64, 1.0, 1.0);
        }
    }

    /// Gradient-stroked multi-harmonic curves between coupled quartets.
    fn draw_dyads(&self, engine: &FieldEngine, color: [f32; 3]) {
        let ctx = &self.ctx;
        for (a, b, phase, amp) in engine.dyad_geometry() {
            let axis = b - a;
            let len = axis.length();
            if len < 1.0 {
                continue;
            }
            let perp = Vec2::new(-axis.y, axis.x) / len;
            let grad =
                ctx.create_linear_gradient(a.x as f64, a.y as f64, b.x as f64, b.y as f64);
            let _ = grad.add_color_stop(0.0, &rgba(color[0], color[1], color[2], 0.05));
            let _ = grad.add_color_stop(0.5, &rgba(color[0], color[1], color[2], 0.35));
            let _ = grad.add_color_stop(1.0, &rgba(color[0], color[1], color[2], 0.05));
            ctx.set_stroke_style_canvas_gradient(&grad);
            ctx.set_line_width(1.5);
            ctx.begin_path();
            let steps = 32;
            for s in 0..=steps {
                let t01 = s as f32 / steps as f32;
                let p = a + axis * t01 + perp * wave_profile(t01, phase, engine.wave_time()) * amp;
                if s == 0 {
                    ctx.move_to(p.x as f64, p.y as f64);
                } else {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
            }
            ctx.stroke();
        }
    }

    /// Template topology between surviving members of each constellation.
    fn draw_constellation_edges(&self, engine: &FieldEngine, color: [f32; 3]) {
        let ctx = &self.ctx;
        let edges = engine.constellation_edges();
        if edges.is_empty() {
            return;
        }
        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], 0.28));
        ctx.begin_path();
        for (a, b) in edges {
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
        }
        ctx.stroke();
    }

    /// Distance-weighted connective lines; alpha is boosted by live mode and
    /// pulse intensity.
    fn draw_links(&self, engine: &FieldEngine, input: &FrameInput, color: [f32; 3]) {
        let ctx = &self.ctx;
        let particles = engine.particles();
        ctx.set_line_width(1.0);
        for link in engine.links() {
            let a = &particles[link.a];
            let b = &particles[link.b];
            let alpha = engine.link_alpha(link, input);
            ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], alpha));
            ctx.begin_path();
            ctx.move_to(a.pos.x as f64, a.pos.y as f64);
            ctx.line_to(b.pos.x as f64, b.pos.y as f64);
            ctx.stroke();
        }
    }

    /// Trail dots shrink and fade; sparks, nodes, and stars get a radial glow
    /// plus an opaque core tinted by the particle's hue shift.
    fn draw_particles(&self, engine: &FieldEngine, color: [f32; 3]) {
        let ctx = &self.ctx;
        for p in engine.particles() {
            let (alpha, radius) = match p.kind {
                ParticleKind::Trail => {
                    let f = (p.life / TRAIL_LIFE).clamp(0.0, 1.0);
                    (f * 0.6, p.radius * f)
                }
                ParticleKind::Spark => ((p.life / 100.0).min(1.0) * 0.8, p.radius),
                _ => (1.0, p.radius),
            };
            if alpha <= 0.0 || radius <= 0.0 {
                continue;
            }

            if p.kind != ParticleKind::Trail {
                if let Ok(glow) = ctx.create_radial_gradient(
                    p.pos.x as f64,
                    p.pos.y as f64,
                    0.0,
                    p.pos.x as f64,
                    p.pos.y as f64,
                    (radius * 3.0) as f64,
                ) {
                    let _ = glow.add_color_stop(0.0, &shifted(color, p.hue_shift, alpha * 0.4));
                    let _ = glow.add_color_stop(1.0, "rgba(0,0,0,0)");
                    ctx.set_fill_style_canvas_gradient(&glow);
                    ctx.begin_path();
                    let _ = ctx.arc(
                        p.pos.x as f64,
                        p.pos.y as f64,
                        (radius * 3.0) as f64,
                        0.0,
                        TAU as f64,
                    );
                    ctx.fill();
                }
            }

            ctx.set_fill_style_str(&rgba(200.0 + p.hue_shift, 220.0, 255.0, alpha));
            ctx.begin_path();
            let _ = ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                radius as f64,
                0.0,
                TAU as f64,
            );
            ctx.fill();
        }
    }

    /// Pointer trail stroke and the influence halo while dragging.
    fn draw_pointer(&self, engine: &FieldEngine, color: [f32; 3]) {
        let ctx = &self.ctx;
        let pointer = &engine.pointer;
        if !pointer.down {
            return;
        }

        if pointer.trail.len() > 1 {
            ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], 0.3));
            ctx.set_line_width(2.0);
            ctx.set_line_cap("round");
            ctx.begin_path();
            for (i, point) in pointer.trail.iter().enumerate() {
                if i == 0 {
                    ctx.move_to(point.pos.x as f64, point.pos.y as f64);
                } else {
                    ctx.line_to(point.pos.x as f64, point.pos.y as f64);
                }
            }
            ctx.stroke();
            ctx.set_line_cap("butt");
        }

        let fast = pointer.speed() > FAST_DRAG_SPEED;
        let radius = if fast { REPULSION_RADIUS } else { ATTRACTION_RADIUS };
        if let Ok(halo) = ctx.create_radial_gradient(
            pointer.pos.x as f64,
            pointer.pos.y as f64,
            0.0,
            pointer.pos.x as f64,
            pointer.pos.y as f64,
            radius as f64,
        ) {
            let peak = if fast { 0.15 } else { 0.08 };
            let _ = halo.add_color_stop(0.0, &rgba(color[0], color[1], color[2], peak));
            let _ = halo.add_color_stop(1.0, "rgba(0,0,0,0)");
            ctx.set_fill_style_canvas_gradient(&halo);
            ctx.begin_path();
            let _ = ctx.arc(
                pointer.pos.x as f64,
                pointer.pos.y as f64,
                radius as f64,
                0.0,
                TAU as f64,
            );
            ctx.fill();
        }
    }
}
