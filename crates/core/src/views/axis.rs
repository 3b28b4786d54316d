use evstory_protocol::{Point, RenderCommand, TextAlign, ThemeToken};

use crate::format::{format_tick, format_year};
use crate::scale::{BandScale, LinearScale};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;
const TICK_COUNT: usize = 10;

/// A labelled position along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Which edge of the plot the axis sits on. Labels go on the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// Plain integers, e.g. years.
    Year,
    /// Thousands-grouped values with step-dependent precision.
    Grouped,
}

pub fn linear_ticks(scale: &LinearScale, format: TickFormat) -> Vec<Tick> {
    let step = scale.tick_step(TICK_COUNT);
    scale
        .ticks(TICK_COUNT)
        .into_iter()
        // Fractional years would print as duplicates.
        .filter(|value| format != TickFormat::Year || value.fract() == 0.0)
        .map(|value| Tick {
            position: scale.apply(value),
            label: match format {
                TickFormat::Year => format_year(value),
                TickFormat::Grouped => format_tick(value, step),
            },
        })
        .collect()
}

/// One tick per band, at the band centre.
pub fn band_ticks(scale: &BandScale) -> Vec<Tick> {
    scale
        .domain()
        .iter()
        .filter_map(|name| {
            scale.center(name).map(|position| Tick {
                position,
                label: name.clone(),
            })
        })
        .collect()
}

/// Render an axis line with tick marks and labels.
///
/// `offset` is the cross-axis coordinate the axis sits on (the y of a
/// bottom axis, the x of a left axis). `extent` is the span of the axis
/// line along its own direction. A non-zero `label_rotation` (degrees)
/// tilts bottom labels and anchors them at their end.
pub fn render_axis(
    id: &str,
    side: AxisSide,
    offset: f64,
    extent: (f64, f64),
    ticks: &[Tick],
    label_rotation: f64,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(ticks.len() * 2 + 3);
    commands.push(RenderCommand::BeginGroup {
        id: format!("axis-{id}"),
        label: None,
    });

    let (from, to) = match side {
        AxisSide::Bottom => (Point::new(extent.0, offset), Point::new(extent.1, offset)),
        AxisSide::Left => (Point::new(offset, extent.0), Point::new(offset, extent.1)),
    };
    let rotation = match side {
        AxisSide::Bottom => label_rotation,
        AxisSide::Left => 0.0,
    };
    commands.push(RenderCommand::DrawLine {
        from,
        to,
        color: ThemeToken::AxisLine,
        width: 1.0,
        dash: None,
    });

    for tick in ticks {
        let p = tick.position;
        let (tick_from, tick_to, label_pos, align) = match side {
            AxisSide::Bottom => {
                let label_y = offset + TICK_SIZE + TICK_PADDING;
                if label_rotation == 0.0 {
                    (
                        Point::new(p, offset),
                        Point::new(p, offset + TICK_SIZE),
                        Point::new(p, label_y + FONT_SIZE),
                        TextAlign::Center,
                    )
                } else {
                    (
                        Point::new(p, offset),
                        Point::new(p, offset + TICK_SIZE),
                        Point::new(p, label_y),
                        TextAlign::Right,
                    )
                }
            }
            AxisSide::Left => (
                Point::new(offset - TICK_SIZE, p),
                Point::new(offset, p),
                Point::new(offset - TICK_SIZE - TICK_PADDING, p + FONT_SIZE * 0.32),
                TextAlign::Right,
            ),
        };

        commands.push(RenderCommand::DrawLine {
            from: tick_from,
            to: tick_to,
            color: ThemeToken::AxisTick,
            width: 1.0,
            dash: None,
        });
        commands.push(RenderCommand::DrawText {
            position: label_pos,
            text: tick.label.clone(),
            color: ThemeToken::AxisLabel,
            font_size: FONT_SIZE,
            align,
            rotation,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
