use evstory_protocol::{Canvas, Rect, RenderCommand, ThemeToken};

use crate::aggregate::{RegionTotal, max_total};
use crate::format::sales_label;
use crate::scale::{BandScale, LinearScale};
use crate::views::axis::{self, AxisSide, TickFormat};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;
const BAND_PADDING: f64 = 0.1;

/// Render ranked country totals as horizontal bars, first entry on top.
pub fn render_ranking(entries: &[RegionTotal], canvas: &Canvas) -> Vec<RenderCommand> {
    let Some(max) = max_total(entries) else {
        return Vec::new();
    };

    let x_range = (MARGIN_LEFT, canvas.width - MARGIN_RIGHT);
    let y_range = (MARGIN_TOP, canvas.height - MARGIN_BOTTOM);
    let x = LinearScale::new((0.0, max), x_range);
    let y = BandScale::new(
        entries.iter().map(|e| e.category.clone()).collect(),
        y_range,
        BAND_PADDING,
    );

    let mut commands = Vec::with_capacity(entries.len() * 3 + 32);
    commands.extend(axis::render_axis(
        "x",
        AxisSide::Bottom,
        y_range.1,
        x_range,
        &axis::linear_ticks(&x, TickFormat::Grouped),
        0.0,
    ));
    commands.extend(axis::render_axis(
        "y",
        AxisSide::Left,
        x_range.0,
        y_range,
        &axis::band_ticks(&y),
        0.0,
    ));

    commands.push(RenderCommand::BeginGroup {
        id: "series-ranking".into(),
        label: Some("EV sales by country".into()),
    });
    let x0 = x.apply(0.0);
    for entry in entries {
        let Some(top) = y.band(&entry.category) else {
            continue;
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x0, top, x.apply(entry.total) - x0, y.bandwidth()),
            color: ThemeToken::BarFill,
            label: Some(sales_label(&entry.category, entry.total)),
        });
    }
    commands.push(RenderCommand::EndGroup);

    commands
}
