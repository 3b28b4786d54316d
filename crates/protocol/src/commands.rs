use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each scene. Renderers consume
/// this list sequentially — each command carries all the data it needs.
/// A new list always replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle. `label` is the hover text, if any.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        label: Option<String>,
    },

    /// Draw a filled circle. `label` is the hover text, if any.
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        label: Option<String>,
    },

    /// Draw a text string at a position, rotated by `rotation` degrees
    /// around that position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        rotation: f64,
    },

    /// Draw a line segment. `dash` is `[on, off]` lengths for dashed strokes.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
        dash: Option<[f64; 2]>,
    },

    /// Draw connected line segments through `points`.
    DrawPolyline {
        points: Vec<Point>,
        color: ThemeToken,
        width: f64,
    },

    /// Begin a logical group (a scene, an axis, a series). Renderers may use
    /// this for layering or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    /// Hover text attached to this command, if it carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            RenderCommand::DrawRect { label, .. } | RenderCommand::DrawCircle { label, .. } => {
                label.as_deref()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_only_on_marks() {
        let dot = RenderCommand::DrawCircle {
            center: Point::new(1.0, 2.0),
            radius: 4.0,
            color: ThemeToken::DotFill,
            label: Some("China: 900 EVs".into()),
        };
        assert_eq!(dot.label(), Some("China: 900 EVs"));

        let text = RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "title".into(),
            color: ThemeToken::TextPrimary,
            font_size: 16.0,
            align: TextAlign::Center,
            rotation: 0.0,
        };
        assert_eq!(text.label(), None);
    }

    #[test]
    fn serializes_externally_tagged() {
        let cmd = RenderCommand::DrawLine {
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 10.0),
            color: ThemeToken::Annotation,
            width: 1.0,
            dash: Some([4.0, 2.0]),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.starts_with(r#"{"DrawLine":"#));
        assert!(json.contains(r#""dash":[4.0,2.0]"#));
        let back: RenderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
