use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use evstory_core::hit::hit_test_within;
use evstory_core::{Scene, Story};
use evstory_protocol::{Canvas, Point, RenderCommand, TextAlign, ThemeToken};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted => Color::Gray,
        ThemeToken::AxisLine | ThemeToken::AxisTick => Color::DarkGray,
        ThemeToken::AxisLabel => Color::Gray,
        ThemeToken::TrendLine => Color::Rgb(70, 130, 180),
        ThemeToken::TrendMarker => Color::Rgb(255, 140, 0),
        ThemeToken::Annotation => Color::Gray,
        ThemeToken::BarFill => Color::Rgb(0, 128, 128),
        ThemeToken::DotFill => Color::Rgb(228, 87, 86),
        ThemeToken::HoverHighlight => Color::LightYellow,
    }
}

/// Maps canvas coordinates onto the terminal cells of the plot area.
#[derive(Debug, Clone, Copy)]
struct CellMap {
    area: Rect,
    col_scale: f64,
    row_scale: f64,
}

impl CellMap {
    fn new(area: Rect, canvas: &Canvas) -> Self {
        Self {
            area,
            col_scale: f64::from(area.width) / canvas.width,
            row_scale: f64::from(area.height) / canvas.height,
        }
    }

    fn cell(&self, p: Point) -> Option<(u16, u16)> {
        let col = (p.x * self.col_scale).floor();
        let row = (p.y * self.row_scale).floor();
        let (width, height) = (f64::from(self.area.width), f64::from(self.area.height));
        if col < 0.0 || row < 0.0 || col >= width || row >= height {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }

    /// Canvas point at the centre of terminal cell `(col, row)`.
    fn point(&self, col: u16, row: u16) -> Option<Point> {
        let inside = col >= self.area.x
            && row >= self.area.y
            && col < self.area.x + self.area.width
            && row < self.area.y + self.area.height;
        inside.then(|| {
            Point::new(
                (f64::from(col - self.area.x) + 0.5) / self.col_scale,
                (f64::from(row - self.area.y) + 0.5) / self.row_scale,
            )
        })
    }

    /// Hit slack equal to one cell, so any cell a dot lands in hovers it.
    fn tolerance(&self) -> f64 {
        (1.0 / self.col_scale).max(1.0 / self.row_scale)
    }
}

fn put(buf: &mut Buffer, (x, y): (u16, u16), ch: char, fg: Color) {
    buf[(x, y)].set_char(ch).set_fg(fg);
}

fn draw_segment(buf: &mut Buffer, map: &CellMap, from: Point, to: Point, fg: Color, dashed: bool) {
    let dx = (to.x - from.x) * map.col_scale;
    let dy = (to.y - from.y) * map.row_scale;
    let ch = if dy.abs() < 0.5 {
        '─'
    } else if dx.abs() < 0.5 {
        '│'
    } else {
        '·'
    };
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        if dashed && i % 2 == 1 {
            continue;
        }
        let t = i as f64 / steps as f64;
        let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        if let Some(cell) = map.cell(p) {
            put(buf, cell, ch, fg);
        }
    }
}

fn draw_commands(
    buf: &mut Buffer,
    map: &CellMap,
    commands: &[RenderCommand],
    hovered: Option<&str>,
) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color, label } => {
                let fg = if label.is_some() && label.as_deref() == hovered {
                    theme_to_color(ThemeToken::HoverHighlight)
                } else {
                    theme_to_color(*color)
                };
                let (Some((c0, r0)), Some((c1, r1))) = (
                    map.cell(Point::new(rect.x, rect.y)),
                    map.cell(Point::new(rect.x + rect.w, rect.y + rect.h)),
                ) else {
                    continue;
                };
                for row in r0..=r1.max(r0) {
                    for col in c0..=c1.max(c0) {
                        put(buf, (col, row), '█', fg);
                    }
                }
            }
            RenderCommand::DrawCircle {
                center,
                color,
                label,
                ..
            } => {
                let fg = if label.is_some() && label.as_deref() == hovered {
                    theme_to_color(ThemeToken::HoverHighlight)
                } else {
                    theme_to_color(*color)
                };
                if let Some(cell) = map.cell(*center) {
                    put(buf, cell, '●', fg);
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                dash,
                ..
            } => {
                let fg = theme_to_color(*color);
                draw_segment(buf, map, *from, *to, fg, dash.is_some());
            }
            RenderCommand::DrawPolyline { points, color, .. } => {
                let fg = theme_to_color(*color);
                for pair in points.windows(2) {
                    draw_segment(buf, map, pair[0], pair[1], fg, false);
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                rotation,
                ..
            } => {
                // Tilted tick labels can't be laid out on a cell grid; the
                // hover label names the mark instead.
                if *rotation != 0.0 {
                    continue;
                }
                let Some((col, row)) = map.cell(*position) else {
                    continue;
                };
                let len = text.chars().count() as u16;
                let start = match align {
                    TextAlign::Left => col,
                    TextAlign::Center => col.saturating_sub(len / 2),
                    TextAlign::Right => col.saturating_sub(len),
                };
                let start = start.max(map.area.x);
                let end = map.area.x + map.area.width;
                let fg = theme_to_color(*color);
                for (i, ch) in text.chars().enumerate() {
                    let x = start + i as u16;
                    if x >= end {
                        break;
                    }
                    put(buf, (x, row), ch, fg);
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

fn header_line(story: &Story) -> Line<'static> {
    let view = story.view();
    let mut spans = vec![Span::raw(" EV sales ")];
    for scene in Scene::ALL {
        let label = format!(" [{}] {} ", scene.index() + 1, scene_name(scene));
        let style = if scene == view.active_scene {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(label, style));
    }
    if story.frame().year_selector_visible {
        spans.push(Span::raw(format!(" | Year: {} (←/→)", view.selected_year)));
    }
    spans.push(Span::raw(" | q quit "));
    Line::from(spans)
}

fn scene_name(scene: Scene) -> &'static str {
    match scene {
        Scene::Trend => "Global trend",
        Scene::Ranking => "Top countries",
        Scene::Exploration => "Explore",
    }
}

/// Plot area: everything between the header row and the footer row.
fn plot_area(area: Rect) -> Rect {
    let height = area.height.saturating_sub(2);
    Rect::new(area.x, area.y + 1, area.width, height)
}

fn draw(frame: &mut Frame<'_>, story: &Story, hovered: Option<&str>) {
    let area = frame.area();

    let header_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let header = Paragraph::new(header_line(story)).style(header_style);
    frame.render_widget(header, Rect::new(area.x, area.y, area.width, 1));

    let plot = plot_area(area);
    let background = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(background, plot);
    let map = CellMap::new(plot, &story.config().canvas);
    draw_commands(frame.buffer_mut(), &map, &story.frame().commands, hovered);

    let footer = match hovered {
        Some(label) => Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(Color::Black)
                .bg(theme_to_color(ThemeToken::HoverHighlight)),
        ),
        None => Span::styled(
            format!(" {}", story.frame().description),
            Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
        ),
    };
    let footer_row = area.y + area.height.saturating_sub(1);
    frame.render_widget(
        Paragraph::new(Line::from(footer)),
        Rect::new(area.x, footer_row, area.width, 1),
    );
}

/// Run the interactive story until the user quits.
pub fn run_tui(story: &mut Story) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, story);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, story: &mut Story) -> Result<()> {
    let mut hovered: Option<String> = None;

    loop {
        terminal.draw(|frame| draw(frame, story, hovered.as_deref()))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let before = story.view();
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(c @ '1'..='3') => {
                        let index = c as usize - '1' as usize;
                        if let Some(scene) = Scene::from_index(index) {
                            story.select_scene(scene);
                        }
                    }
                    KeyCode::Tab => {
                        story.next_scene();
                    }
                    KeyCode::BackTab => {
                        story.previous_scene();
                    }
                    // The year selector is hidden on the trend scene.
                    KeyCode::Left if story.frame().year_selector_visible => {
                        story.step_year(-1);
                    }
                    KeyCode::Right if story.frame().year_selector_visible => {
                        story.step_year(1);
                    }
                    _ => {}
                }
                if story.view() != before {
                    hovered = None;
                }
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Moved) => {
                let size = terminal.size()?;
                let plot = plot_area(Rect::new(0, 0, size.width, size.height));
                let map = CellMap::new(plot, &story.config().canvas);
                let commands = &story.frame().commands;
                hovered = map
                    .point(mouse.column, mouse.row)
                    .and_then(|p| hit_test_within(commands, p, map.tolerance()))
                    .map(str::to_string);
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_map_round_trips_cell_centres() {
        let map = CellMap::new(Rect::new(0, 1, 90, 50), &Canvas::default());
        let p = map.point(45, 26).unwrap();
        assert_eq!(map.cell(p), Some((45, 26)));
        assert!(map.point(0, 0).is_none(), "header row is outside the plot");
        assert!(map.cell(Point::new(-1.0, 10.0)).is_none());
    }

    #[test]
    fn draws_marks_into_buffer() {
        let area = Rect::new(0, 0, 90, 50);
        let mut buf = Buffer::empty(area);
        let map = CellMap::new(area, &Canvas::default());
        let cmds = vec![
            RenderCommand::DrawCircle {
                center: Point::new(455.0, 255.0),
                radius: 5.0,
                color: ThemeToken::DotFill,
                label: Some("China: 900 EVs".into()),
            },
            RenderCommand::DrawText {
                position: Point::new(100.0, 30.0),
                text: "Title".into(),
                color: ThemeToken::TextPrimary,
                font_size: 16.0,
                align: TextAlign::Left,
                rotation: 0.0,
            },
        ];
        draw_commands(&mut buf, &map, &cmds, Some("China: 900 EVs"));
        assert_eq!(buf[(45, 25)].symbol(), "●");
        assert_eq!(buf[(45, 25)].fg, theme_to_color(ThemeToken::HoverHighlight));
        assert_eq!(buf[(10, 3)].symbol(), "T");
    }
}
