//! Small color/string helpers for the Canvas2D pipeline.

/// CSS rgba() string from 0-255 channels and a 0-1 alpha.
#[inline]
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> String {
    format!(
        "rgba({:.0},{:.0},{:.0},{:.3})",
        r.clamp(0.0, 255.0),
        g.clamp(0.0, 255.0),
        b.clamp(0.0, 255.0),
        a.max(0.0)
    )
}

/// Theme color with a per-particle hue shift folded into the warm channel.
#[inline]
pub fn shifted(color: [f32; 3], hue_shift: f32, a: f32) -> String {
    rgba(color[0] + hue_shift, color[1], color[2], a)
}

/// Cheap deterministic 0-1 hash; keeps shimmer effects free of RNG state.
#[inline]
pub fn hash01(n: f32) -> f32 {
    ((n.sin() * 43758.547).fract() + 1.0).fract()
}
