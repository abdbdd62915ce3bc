//! Theme-selectable ambient backdrop routines. Each is self-contained and
//! parameterized only by elapsed time, scroll offset, pulse intensity, the
//! palette, and the surface size, so switching styles never touches the
//! particle field.

use super::helpers::{hash01, rgba};
use app_core::Backdrop;
use std::f32::consts::TAU;
use web_sys as web;

pub(crate) fn draw(
    ctx: &web::CanvasRenderingContext2d,
    backdrop: Backdrop,
    color: [f32; 3],
    t: f32,
    scroll: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    match backdrop {
        Backdrop::Grid => grid_planes(ctx, color, scroll, pulse, w, h),
        Backdrop::Traces => trace_lines(ctx, color, t, pulse, w, h),
        Backdrop::Spirals => spiral_arms(ctx, color, t, scroll, pulse, w, h),
        Backdrop::Polyhedra => polyhedra(ctx, color, t, pulse, w, h),
        Backdrop::Mesh => dense_mesh(ctx, color, t, pulse, w, h),
        Backdrop::Streams => gradient_streams(ctx, color, t, scroll, pulse, w, h),
    }
}

/// Perspective floor: horizontal lines bunching toward a horizon plus
/// converging verticals.
fn grid_planes(
    ctx: &web::CanvasRenderingContext2d,
    color: [f32; 3],
    scroll: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    let horizon = h * (0.52 + scroll * 0.06);
    let alpha = 0.05 + pulse * 0.05;
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], alpha));
    ctx.begin_path();
    for i in 0..12 {
        let f = (i as f32 / 12.0).powi(2);
        let y = horizon + f * (h - horizon);
        ctx.move_to(0.0, y as f64);
        ctx.line_to(w as f64, y as f64);
    }
    let vanish_x = w * 0.5;
    for i in 0..14 {
        let x = w * i as f32 / 13.0;
        ctx.move_to(vanish_x as f64, horizon as f64);
        ctx.line_to(x as f64, h as f64);
    }
    ctx.stroke();
}

/// Faint horizontal rails with a bright segment traveling along each.
fn trace_lines(
    ctx: &web::CanvasRenderingContext2d,
    color: [f32; 3],
    t: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    ctx.set_line_width(1.0);
    for i in 0..5 {
        let y = h * (0.15 + 0.17 * i as f32);
        ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], 0.05));
        ctx.begin_path();
        ctx.move_to(0.0, y as f64);
        ctx.line_to(w as f64, y as f64);
        ctx.stroke();

        let head = ((t * (0.12 + 0.05 * i as f32) + i as f32 * 0.37).fract()) * (w + 120.0) - 60.0;
        let grad = ctx.create_linear_gradient(
            (head - 80.0) as f64,
            y as f64,
            head as f64,
            y as f64,
        );
        let _ = grad.add_color_stop(0.0, "rgba(0,0,0,0)");
        let _ = grad.add_color_stop(
            1.0,
            &rgba(color[0], color[1], color[2], 0.35 + pulse * 0.3),
        );
        ctx.set_stroke_style_canvas_gradient(&grad);
        ctx.begin_path();
        ctx.move_to((head - 80.0) as f64, y as f64);
        ctx.line_to(head as f64, y as f64);
        ctx.stroke();
    }
}

/// Central seal ellipse surrounded by three slowly rotating spiral arms.
fn spiral_arms(
    ctx: &web::CanvasRenderingContext2d,
    color: [f32; 3],
    t: f32,
    scroll: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    let cx = w * 0.5;
    let cy = h * (0.34 + scroll * 0.08);

    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(&rgba(255.0, 255.0, 255.0, 0.1 + pulse * 0.12));
    ctx.begin_path();
    let _ = ctx.ellipse(
        cx as f64,
        cy as f64,
        (150.0 + pulse * 20.0) as f64,
        (76.0 + pulse * 10.0) as f64,
        0.22,
        0.0,
        TAU as f64,
    );
    ctx.stroke();

    ctx.set_line_width(2.0);
    let rot = t * 0.35 * (1.0 + pulse * 0.5);
    for arm in 0..3 {
        ctx.set_stroke_style_str(&rgba(
            color[0],
            color[1],
            color[2],
            0.08 + pulse * 0.16,
        ));
        ctx.begin_path();
        for s in 0..40 {
            let sf = s as f32;
            let theta = sf * 0.16 + rot + arm as f32 * TAU / 3.0;
            let r = 14.0 + sf * (4.0 + pulse * 1.5);
            let x = cx + theta.cos() * r;
            let y = cy + theta.sin() * r * 0.6;
            if s == 0 {
                ctx.move_to(x as f64, y as f64);
            } else {
                ctx.line_to(x as f64, y as f64);
            }
        }
        ctx.stroke();
    }
}

/// A handful of wireframe polygons bobbing and rotating in place.
fn polyhedra(
    ctx: &web::CanvasRenderingContext2d,
    color: [f32; 3],
    t: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], 0.1 + pulse * 0.08));
    for i in 0..5 {
        let fi = i as f32;
        let cx = w * (0.12 + 0.19 * fi + 0.03 * (t * 0.11 + fi).sin());
        let cy = h * (0.25 + 0.5 * hash01(fi * 7.31)) + (t * 0.4 + fi * 1.7).sin() * 14.0;
        let sides = 3 + i;
        let r = 26.0 + 10.0 * hash01(fi * 3.77);
        let spin = t * 0.2 + fi;
        ctx.begin_path();
        for v in 0..=sides {
            let ang = spin + TAU * v as f32 / sides as f32;
            let x = cx + ang.cos() * r;
            let y = cy + ang.sin() * r;
            if v == 0 {
                ctx.move_to(x as f64, y as f64);
            } else {
                ctx.line_to(x as f64, y as f64);
            }
        }
        ctx.stroke();
    }
}

/// Dense lattice of points joined to their right/down neighbors, displaced
/// by slow sinusoids.
fn dense_mesh(
    ctx: &web::CanvasRenderingContext2d,
    color: [f32; 3],
    t: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    let spacing = 80.0_f32;
    let cols = (w / spacing) as i32 + 2;
    let rows = (h / spacing) as i32 + 2;
    let warp = |col: f32, row: f32| -> (f32, f32) {
        let x = col * spacing + (row * 0.7 + t * 0.6).sin() * 6.0;
        let y = row * spacing + (col * 0.9 + t * 0.45).cos() * 6.0;
        (x, y)
    };
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(&rgba(color[0], color[1], color[2], 0.06 + pulse * 0.05));
    ctx.begin_path();
    for row in 0..rows {
        for col in 0..cols {
            let (x, y) = warp(col as f32, row as f32);
            let (xr, yr) = warp(col as f32 + 1.0, row as f32);
            let (xd, yd) = warp(col as f32, row as f32 + 1.0);
            ctx.move_to(x as f64, y as f64);
            ctx.line_to(xr as f64, yr as f64);
            ctx.move_to(x as f64, y as f64);
            ctx.line_to(xd as f64, yd as f64);
        }
    }
    ctx.stroke();
}

/// Vertical gradient ribbons swaying with time and scroll.
fn gradient_streams(
    ctx: &web::CanvasRenderingContext2d,
    color: [f32; 3],
    t: f32,
    scroll: f32,
    pulse: f32,
    w: f32,
    h: f32,
) {
    ctx.set_line_width(26.0);
    ctx.set_line_cap("round");
    for i in 0..6 {
        let fi = i as f32;
        let base_x = (fi + 0.5) * w / 6.0;
        let grad = ctx.create_linear_gradient(base_x as f64, 0.0, base_x as f64, h as f64);
        let peak = 0.08 + pulse * 0.08;
        let _ = grad.add_color_stop(0.0, "rgba(0,0,0,0)");
        let _ = grad.add_color_stop(0.5, &rgba(color[0], color[1], color[2], peak));
        let _ = grad.add_color_stop(1.0, "rgba(0,0,0,0)");
        ctx.set_stroke_style_canvas_gradient(&grad);
        ctx.begin_path();
        let sway = 30.0 + 18.0 * hash01(fi * 5.13);
        for s in 0..=16 {
            let f = s as f32 / 16.0;
            let x = base_x + ((f * 3.1 + t * 0.3 + fi) + scroll * 2.0).sin() * sway;
            let y = f * h;
            if s == 0 {
                ctx.move_to(x as f64, y as f64);
            } else {
                ctx.line_to(x as f64, y as f64);
            }
        }
        ctx.stroke();
    }
    ctx.set_line_cap("butt");
}
