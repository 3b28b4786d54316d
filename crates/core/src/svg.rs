//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use evstory_protocol::{Canvas, Point, RenderCommand, TextAlign, ThemeToken};

const FONT_STYLE: &str = "font-family:system-ui,-apple-system,sans-serif;font-size:10px";

/// Render a list of commands as an SVG document string.
///
/// `canvas` defines the viewBox. `dark` selects the color palette. Hover
/// labels become `<title>` children so browsers show them as tooltips.
pub fn render_svg(commands: &[RenderCommand], canvas: &Canvas, dark: bool) -> String {
    let (width, height) = (canvas.width, canvas.height);
    let mut svg = String::with_capacity(commands.len() * 160 + 256);
    svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    svg.push_str(&format!(r#" viewBox="0 0 {width} {height}""#));
    svg.push_str(&format!(r#" width="{width}" height="{height}""#));
    svg.push_str(&format!(r#" style="{FONT_STYLE}">"#));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color, label } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}">"#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.w.max(0.0)),
                    num(rect.h.max(0.0)),
                ));
                push_title(&mut svg, label.as_deref());
                svg.push_str("</rect>");
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
                label,
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}">"#,
                    num(center.x),
                    num(center.y),
                    num(*radius),
                ));
                push_title(&mut svg, label.as_deref());
                svg.push_str("</circle>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                dash,
            } => {
                let stroke = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y),
                ));
                svg.push_str(&stroke_attrs(stroke, *line_width));
                if let Some([on, off]) = dash {
                    svg.push_str(&format!(r#" stroke-dasharray="{on} {off}""#));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawPolyline {
                points,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                let points = points_attr(points);
                svg.push_str(&format!(r#"<polyline points="{points}" fill="none""#));
                svg.push_str(&stroke_attrs(stroke, *line_width));
                svg.push_str("/>");
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                rotation,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let (x, y) = (num(position.x), num(position.y));
                svg.push_str(&format!(r#"<text x="{x}" y="{y}" fill="{fill}""#));
                svg.push_str(&format!(r#" font-size="{font_size}""#));
                svg.push_str(&format!(r#" text-anchor="{anchor}""#));
                if *rotation != 0.0 {
                    svg.push_str(&format!(r#" transform="rotate({rotation} {x} {y})""#));
                }
                svg.push_str(&format!(">{}</text>", escape_xml(text)));
            }
            RenderCommand::BeginGroup { id, .. } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn push_title(svg: &mut String, label: Option<&str>) {
    if let Some(label) = label {
        svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
    }
}

fn stroke_attrs(stroke: &str, width: f64) -> String {
    format!(r#" stroke="{stroke}" stroke-width="{width}""#)
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim coordinates to two decimals; SVG doesn't need more.
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#181818",
            ThemeToken::TextPrimary | ThemeToken::AxisLabel => "#ececec",
            ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::AxisLine | ThemeToken::AxisTick => "#9e9e9e",
            ThemeToken::TrendLine => "#6fa8dc",
            ThemeToken::TrendMarker => "#ffa726",
            ThemeToken::Annotation => "#bdbdbd",
            ThemeToken::BarFill => "#26a69a",
            ThemeToken::DotFill => "#ef6c57",
            ThemeToken::HoverHighlight => "#448aff",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::TextPrimary | ThemeToken::AxisLabel => "#1a1a2e",
            ThemeToken::TextMuted => "#666677",
            ThemeToken::AxisLine | ThemeToken::AxisTick => "#333333",
            ThemeToken::TrendLine => "#4682b4",
            ThemeToken::TrendMarker => "#ff8c00",
            ThemeToken::Annotation => "#808080",
            ThemeToken::BarFill => "#008080",
            ThemeToken::DotFill => "#e45756",
            ThemeToken::HoverHighlight => "#ffd60a",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
