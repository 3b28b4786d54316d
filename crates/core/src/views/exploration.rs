use evstory_protocol::{Canvas, Point, RenderCommand, ThemeToken};

use crate::aggregate::{RegionTotal, max_total};
use crate::format::sales_label;
use crate::scale::{BandScale, LinearScale};
use crate::views::axis::{self, AxisSide, TickFormat};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;
const BAND_PADDING: f64 = 0.2;
const DOT_RADIUS: f64 = 5.0;
const LABEL_ROTATION: f64 = -45.0;

/// Render every country as a dot, categories along x and sales up y.
///
/// Each dot carries its hover label; renderers show it on pointer-over.
pub fn render_exploration(entries: &[RegionTotal], canvas: &Canvas) -> Vec<RenderCommand> {
    let Some(max) = max_total(entries) else {
        return Vec::new();
    };

    let x_range = (MARGIN_LEFT, canvas.width - MARGIN_RIGHT);
    let y_range = (canvas.height - MARGIN_BOTTOM, MARGIN_TOP);
    let x = BandScale::new(
        entries.iter().map(|e| e.category.clone()).collect(),
        x_range,
        BAND_PADDING,
    );
    let y = LinearScale::new((0.0, max), y_range);

    let mut commands = Vec::with_capacity(entries.len() * 4 + 32);
    commands.extend(axis::render_axis(
        "x",
        AxisSide::Bottom,
        y_range.0,
        x_range,
        &axis::band_ticks(&x),
        LABEL_ROTATION,
    ));
    commands.extend(axis::render_axis(
        "y",
        AxisSide::Left,
        x_range.0,
        (y_range.1, y_range.0),
        &axis::linear_ticks(&y, TickFormat::Grouped),
        0.0,
    ));

    commands.push(RenderCommand::BeginGroup {
        id: "series-exploration".into(),
        label: Some("EV sales by country".into()),
    });
    for entry in entries {
        let Some(cx) = x.center(&entry.category) else {
            continue;
        };
        commands.push(RenderCommand::DrawCircle {
            center: Point::new(cx, y.apply(entry.total)),
            radius: DOT_RADIUS,
            color: ThemeToken::DotFill,
            label: Some(sales_label(&entry.category, entry.total)),
        });
    }
    commands.push(RenderCommand::EndGroup);

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregatedPoint;

    #[test]
    fn one_dot_per_country() {
        let entries: Vec<_> = ["China", "USA", "Germany"]
            .iter()
            .zip([900.0, 500.0, 300.0])
            .map(|(name, total)| AggregatedPoint {
                category: name.to_string(),
                total,
            })
            .collect();
        let cmds = render_exploration(&entries, &Canvas::default());
        let dots: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawCircle { center, label, .. } => Some((*center, label.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(dots.len(), 3);
        assert_eq!(dots[0].0.y, 60.0);
        assert!(dots[0].0.x < dots[1].0.x);
        assert_eq!(dots[1].1.as_deref(), Some("USA: 500 EVs"));
    }
}
