//! Palette and presentation selectors consumed from the host application.
//!
//! These are read-only inputs to the simulation: switching any of them never
//! touches particle positions or velocities, only how a frame is painted.

/// Drift/link intensity profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Calm,
    Live,
}

impl Mode {
    #[inline]
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Calm => Mode::Live,
            Mode::Live => Mode::Calm,
        }
    }

    #[inline]
    pub fn is_live(self) -> bool {
        self == Mode::Live
    }
}

/// Active color theme; keys follow the host site's service sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Neutral,
    Sovereign,
    Pipeline,
    Mesh,
    Interface,
    Research,
    Startup,
    Ip,
    Privacy,
}

impl Theme {
    pub const ALL: [Theme; 9] = [
        Theme::Neutral,
        Theme::Sovereign,
        Theme::Pipeline,
        Theme::Mesh,
        Theme::Interface,
        Theme::Research,
        Theme::Startup,
        Theme::Ip,
        Theme::Privacy,
    ];

    /// Base RGB channels (0-255) for lines, glows, and overlays.
    pub fn color(self) -> [f32; 3] {
        match self {
            Theme::Neutral | Theme::Sovereign => [127.0, 180.0, 255.0],
            Theme::Pipeline => [255.0, 181.0, 90.0],
            Theme::Mesh => [255.0, 93.0, 125.0],
            Theme::Interface => [200.0, 220.0, 255.0],
            Theme::Research => [170.0, 210.0, 255.0],
            Theme::Startup => [255.0, 200.0, 135.0],
            Theme::Ip => [255.0, 135.0, 170.0],
            Theme::Privacy => [170.0, 255.0, 220.0],
        }
    }

    pub fn next(self) -> Theme {
        let i = Theme::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Theme::ALL[(i + 1) % Theme::ALL.len()]
    }
}

/// Ambient backdrop style drawn behind the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backdrop {
    #[default]
    Grid,
    Traces,
    Spirals,
    Polyhedra,
    Mesh,
    Streams,
}

impl Backdrop {
    pub const ALL: [Backdrop; 6] = [
        Backdrop::Grid,
        Backdrop::Traces,
        Backdrop::Spirals,
        Backdrop::Polyhedra,
        Backdrop::Mesh,
        Backdrop::Streams,
    ];

    pub fn next(self) -> Backdrop {
        let i = Backdrop::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Backdrop::ALL[(i + 1) % Backdrop::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Backdrop::Grid => "grid",
            Backdrop::Traces => "traces",
            Backdrop::Spirals => "spirals",
            Backdrop::Polyhedra => "polyhedra",
            Backdrop::Mesh => "mesh",
            Backdrop::Streams => "streams",
        }
    }
}
