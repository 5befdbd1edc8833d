use std::fmt;

/// Human-readable diagnostics for the on-screen status line.
///
/// Display-only; nothing parses it back.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Status {
    /// Static hint shown before any interaction.
    Hint(&'static str),
    Started { x: f32, y: f32 },
    Dragging { rotation: f32, scale: f32 },
    Released { vx: f32, vy: f32 },
    Orbit { pitch: f32, yaw: f32 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Hint(text) => f.write_str(text),
            Status::Started { x, y } => write!(f, "touch start at ({}, {})", x.round(), y.round()),
            Status::Dragging { rotation, scale } => {
                write!(f, "dragging | rotation {rotation:.2} | scale {scale:.2}x")
            }
            Status::Released { vx, vy } => write!(f, "released | velocity ({vx:.2}, {vy:.2})"),
            Status::Orbit { pitch, yaw } => write!(f, "orbit | pitch {pitch:.2} | yaw {yaw:.2}"),
        }
    }
}
