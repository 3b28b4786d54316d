use evstory_protocol::{Canvas, Point, RenderCommand, TextAlign, ThemeToken};

use crate::aggregate::{YearTotal, max_total};
use crate::format::sales_label;
use crate::scale::LinearScale;
use crate::views::axis::{self, AxisSide, TickFormat};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 40.0;
const LINE_WIDTH: f64 = 2.0;
const MARKER_RADIUS: f64 = 4.0;
const ANNOTATION_FONT_SIZE: f64 = 13.0;
const ANNOTATION_DASH: [f64; 2] = [4.0, 2.0];

/// Render the global trend as a line with one marker per year.
///
/// `points` must be ascending by year. `annotation_year` gets a dashed
/// reference line and a "rapid growth" label when it falls inside the
/// plotted years.
pub fn render_trend(
    points: &[YearTotal],
    canvas: &Canvas,
    annotation_year: i32,
) -> Vec<RenderCommand> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let max = max_total(points).unwrap_or(0.0);

    let x_range = (MARGIN_LEFT, canvas.width - MARGIN_RIGHT);
    let y_range = (canvas.height - MARGIN_BOTTOM, MARGIN_TOP);
    let years = (f64::from(first.category), f64::from(last.category));
    let x = LinearScale::new(years, x_range);
    let y = LinearScale::new((0.0, max), y_range);

    let mut commands = Vec::with_capacity(points.len() + 64);

    commands.extend(axis::render_axis(
        "x",
        AxisSide::Bottom,
        y_range.0,
        x_range,
        &axis::linear_ticks(&x, TickFormat::Year),
        0.0,
    ));
    commands.extend(axis::render_axis(
        "y",
        AxisSide::Left,
        x_range.0,
        (y_range.1, y_range.0),
        &axis::linear_ticks(&y, TickFormat::Grouped),
        0.0,
    ));

    let positions: Vec<Point> = points
        .iter()
        .map(|p| Point::new(x.apply(f64::from(p.category)), y.apply(p.total)))
        .collect();

    commands.push(RenderCommand::BeginGroup {
        id: "series-trend".into(),
        label: Some("Global EV sales".into()),
    });
    commands.push(RenderCommand::DrawPolyline {
        points: positions.clone(),
        color: ThemeToken::TrendLine,
        width: LINE_WIDTH,
    });
    for (point, center) in points.iter().zip(positions) {
        commands.push(RenderCommand::DrawCircle {
            center,
            radius: MARKER_RADIUS,
            color: ThemeToken::TrendMarker,
            label: Some(sales_label(point.category, point.total)),
        });
    }
    commands.push(RenderCommand::EndGroup);

    if (first.category..=last.category).contains(&annotation_year) {
        commands.extend(render_annotation(points, &x, &y, annotation_year));
    }

    commands
}

fn render_annotation(
    points: &[YearTotal],
    x: &LinearScale,
    y: &LinearScale,
    year: i32,
) -> Vec<RenderCommand> {
    let ax = x.apply(f64::from(year));
    // Without a data point for the year, the line spans the whole plot.
    let top = points
        .iter()
        .find(|p| p.category == year)
        .map_or(y.range.1, |p| y.apply(p.total));

    vec![
        RenderCommand::BeginGroup {
            id: "annotation".into(),
            label: None,
        },
        RenderCommand::DrawLine {
            from: Point::new(ax, y.apply(0.0)),
            to: Point::new(ax, top),
            color: ThemeToken::Annotation,
            width: 1.0,
            dash: Some(ANNOTATION_DASH),
        },
        RenderCommand::DrawText {
            position: Point::new(ax + 5.0, top - 10.0),
            text: format!("Rapid growth begins ({year})"),
            color: ThemeToken::Annotation,
            font_size: ANNOTATION_FONT_SIZE,
            align: TextAlign::Left,
            rotation: 0.0,
        },
        RenderCommand::EndGroup,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregatedPoint;

    fn trend(values: &[(i32, f64)]) -> Vec<YearTotal> {
        values
            .iter()
            .map(|&(category, total)| AggregatedPoint { category, total })
            .collect()
    }

    #[test]
    fn one_marker_per_year_with_tooltips() {
        let points = trend(&[(2019, 100.0), (2020, 250.0), (2021, 600.0)]);
        let cmds = render_trend(&points, &Canvas::default(), 2020);
        let labels: Vec<_> = cmds.iter().filter_map(RenderCommand::label).collect();
        assert_eq!(
            labels,
            vec!["2019: 100 EVs", "2020: 250 EVs", "2021: 600 EVs"]
        );

        let polyline = cmds.iter().find_map(|c| match c {
            RenderCommand::DrawPolyline { points, .. } => Some(points),
            _ => None,
        });
        let polyline = polyline.unwrap();
        assert_eq!(polyline.len(), 3);
        assert_eq!(polyline[0].x, 60.0);
        assert_eq!(polyline[2].x, 860.0);
        // Max total sits at the top of the plot, zero at the bottom.
        assert_eq!(polyline[2].y, 40.0);
    }

    #[test]
    fn annotation_reaches_the_2020_point() {
        let points = trend(&[(2010, 0.0), (2020, 500.0), (2030, 1000.0)]);
        let cmds = render_trend(&points, &Canvas::default(), 2020);
        let dashed = cmds.iter().find_map(|c| match c {
            RenderCommand::DrawLine {
                from,
                to,
                dash: Some(_),
                ..
            } => Some((*from, *to)),
            _ => None,
        });
        let (from, to) = dashed.unwrap();
        assert_eq!(from.x, 460.0);
        assert_eq!(from.y, 460.0);
        assert_eq!(to.y, 250.0);
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, .. } if text == "Rapid growth begins (2020)"
        )));
    }

    #[test]
    fn annotation_outside_years_is_skipped() {
        let points = trend(&[(2010, 1.0), (2015, 2.0)]);
        let cmds = render_trend(&points, &Canvas::default(), 2020);
        let dashed = cmds
            .iter()
            .any(|c| matches!(c, RenderCommand::DrawLine { dash: Some(_), .. }));
        assert!(!dashed);
    }

    #[test]
    fn empty_trend_draws_nothing() {
        assert!(render_trend(&[], &Canvas::default(), 2020).is_empty());
    }
}
