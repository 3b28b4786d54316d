use evstory_protocol::{Point, RenderCommand};

/// Extra slack around dots, in canvas units.
pub const HIT_TOLERANCE: f64 = 3.0;

/// Hover label of the topmost labelled mark under `point`.
pub fn hit_test(commands: &[RenderCommand], point: Point) -> Option<&str> {
    hit_test_within(commands, point, HIT_TOLERANCE)
}

/// Like [`hit_test`] with a caller-chosen tolerance for circles. Coarse
/// surfaces (terminal cells) need more slack than a pointer does.
pub fn hit_test_within(commands: &[RenderCommand], point: Point, tolerance: f64) -> Option<&str> {
    // Later commands are drawn on top, so search back to front.
    commands.iter().rev().find_map(|cmd| match cmd {
        RenderCommand::DrawCircle {
            center,
            radius,
            label: Some(label),
            ..
        } if center.distance(&point) <= radius + tolerance => Some(label.as_str()),
        RenderCommand::DrawRect {
            rect,
            label: Some(label),
            ..
        } if rect.contains(point) => Some(label.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evstory_protocol::{Rect, ThemeToken};

    fn dot(x: f64, y: f64, label: &str) -> RenderCommand {
        RenderCommand::DrawCircle {
            center: Point::new(x, y),
            radius: 5.0,
            color: ThemeToken::DotFill,
            label: Some(label.into()),
        }
    }

    #[test]
    fn finds_dot_within_tolerance() {
        let cmds = vec![
            dot(100.0, 100.0, "China: 900 EVs"),
            dot(200.0, 100.0, "USA: 500 EVs"),
        ];
        assert_eq!(
            hit_test(&cmds, Point::new(107.0, 100.0)),
            Some("China: 900 EVs")
        );
        assert_eq!(
            hit_test(&cmds, Point::new(200.0, 94.0)),
            Some("USA: 500 EVs")
        );
        assert_eq!(hit_test(&cmds, Point::new(150.0, 100.0)), None);
    }

    #[test]
    fn topmost_wins() {
        let cmds = vec![dot(100.0, 100.0, "below"), dot(102.0, 100.0, "above")];
        assert_eq!(hit_test(&cmds, Point::new(101.0, 100.0)), Some("above"));
    }

    #[test]
    fn bars_and_unlabelled_marks() {
        let cmds = vec![
            RenderCommand::DrawRect {
                rect: Rect::new(60.0, 60.0, 300.0, 20.0),
                color: ThemeToken::BarFill,
                label: Some("China: 900 EVs".into()),
            },
            RenderCommand::DrawRect {
                rect: Rect::new(0.0, 0.0, 900.0, 500.0),
                color: ThemeToken::Background,
                label: None,
            },
        ];
        assert_eq!(
            hit_test(&cmds, Point::new(200.0, 70.0)),
            Some("China: 900 EVs")
        );
        assert_eq!(hit_test(&cmds, Point::new(500.0, 70.0)), None);
    }
}
