use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    TextPrimary,
    TextMuted,

    // Axes
    AxisLine,
    AxisTick,
    AxisLabel,

    // Trend scene
    TrendLine,
    TrendMarker,
    Annotation,

    // Ranking scene
    BarFill,

    // Exploration scene
    DotFill,

    HoverHighlight,
}
