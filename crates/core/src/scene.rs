use evstory_protocol::{Point, RenderCommand, TextAlign, ThemeToken};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate;
use crate::config::StoryConfig;
use crate::model::{Dataset, Scene, ViewState};
use crate::views::{exploration, ranking, trend};

const TITLE_Y: f64 = 30.0;
const TITLE_FONT_SIZE: f64 = 16.0;

/// Everything a surface needs to show one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub scene: Scene,
    /// The year the frame was filtered by, for year-dependent scenes.
    pub year: Option<i32>,
    pub title: String,
    pub description: String,
    /// The year selector only makes sense on year-dependent scenes.
    pub year_selector_visible: bool,
    /// Complete drawing for the scene, title included.
    pub commands: Vec<RenderCommand>,
}

/// Build the frame for `view` from scratch.
///
/// Pure: the same inputs always give the same frame, and nothing from a
/// previous frame is consulted.
pub fn render_scene(dataset: &Dataset, view: &ViewState, config: &StoryConfig) -> SceneFrame {
    let scene = view.active_scene;
    let year = view.selected_year;
    let canvas = &config.canvas;

    let (title, description, body) = match scene {
        Scene::Trend => {
            let points = aggregate::global_trend(dataset, &config.world_region);
            debug!(points = points.len(), "rendering trend scene");
            let title = match (points.first(), points.last()) {
                (Some(first), Some(last)) => format!(
                    "Global EV Sales Over Time ({}\u{2013}{})",
                    first.category, last.category
                ),
                _ => "Global EV Sales Over Time".to_string(),
            };
            (
                title,
                format!(
                    "This chart shows the global rise of EV sales over time. \
                     Sales begin to surge rapidly starting in {}.",
                    config.annotation_year
                ),
                trend::render_trend(&points, canvas, config.annotation_year),
            )
        }
        Scene::Ranking => {
            let entries = aggregate::top_countries(dataset, year, config);
            debug!(year, entries = entries.len(), "rendering ranking scene");
            (
                format!("Top {} Countries by EV Sales in {year}", config.top_n),
                format!(
                    "This bar chart displays the top {} countries in EV sales in {year}. \
                     It allows you to explore how countries compare.",
                    config.top_n
                ),
                ranking::render_ranking(&entries, canvas),
            )
        }
        Scene::Exploration => {
            let entries = aggregate::country_totals(dataset, year, config);
            debug!(year, entries = entries.len(), "rendering exploration scene");
            (
                format!("EV Sales by Country in {year}"),
                format!(
                    "Every country's EV sales in {year}. \
                     Hover over a dot to see the country and its sales."
                ),
                exploration::render_exploration(&entries, canvas),
            )
        }
    };

    let mut commands = Vec::with_capacity(body.len() + 3);
    commands.push(RenderCommand::BeginGroup {
        id: format!("scene-{}", scene.id()),
        label: Some(title.clone()),
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(canvas.width / 2.0, TITLE_Y),
        text: title.clone(),
        color: ThemeToken::TextPrimary,
        font_size: TITLE_FONT_SIZE,
        align: TextAlign::Center,
        rotation: 0.0,
    });
    commands.extend(body);
    commands.push(RenderCommand::EndGroup);

    SceneFrame {
        scene,
        year: scene.uses_year().then_some(year),
        title,
        description,
        year_selector_visible: scene.uses_year(),
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SalesRecord;

    fn record(region: &str, year: i32, value: f64) -> SalesRecord {
        SalesRecord {
            region: region.into(),
            year,
            parameter: "EV sales".into(),
            unit: "Vehicles".into(),
            value,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("World", 2019, 100.0),
            record("World", 2020, 250.0),
            record("World", 2023, 3000.0),
            record("USA", 2023, 500.0),
            record("China", 2023, 900.0),
        ])
    }

    #[test]
    fn trend_scene_hides_year_selector() {
        let frame = render_scene(&dataset(), &ViewState::new(2023), &StoryConfig::default());
        assert_eq!(frame.scene, Scene::Trend);
        assert!(!frame.year_selector_visible);
        assert_eq!(frame.year, None);
        assert_eq!(frame.title, "Global EV Sales Over Time (2019\u{2013}2023)");
    }

    #[test]
    fn ranking_scene_title_names_the_year() {
        let view = ViewState::new(2023).with_scene(Scene::Ranking);
        let frame = render_scene(&dataset(), &view, &StoryConfig::default());
        assert!(frame.year_selector_visible);
        assert_eq!(frame.year, Some(2023));
        assert_eq!(frame.title, "Top 15 Countries by EV Sales in 2023");
        let commands = &frame.commands;
        let labels: Vec<_> = commands.iter().filter_map(RenderCommand::label).collect();
        assert_eq!(labels, vec!["China: 900 EVs", "USA: 500 EVs"]);
    }

    #[test]
    fn frame_is_wrapped_in_a_scene_group() {
        let view = ViewState::new(2023).with_scene(Scene::Exploration);
        let frame = render_scene(&dataset(), &view, &StoryConfig::default());
        assert!(matches!(
            frame.commands.first(),
            Some(RenderCommand::BeginGroup { id, .. }) if id == "scene-exploration"
        ));
        assert_eq!(frame.commands.last(), Some(&RenderCommand::EndGroup));
    }

    #[test]
    fn year_without_rows_gives_title_only() {
        let view = ViewState::new(1999).with_scene(Scene::Ranking);
        let frame = render_scene(&dataset(), &view, &StoryConfig::default());
        // Group, title, end.
        assert_eq!(frame.commands.len(), 3);
        assert!(frame.commands.iter().all(|c| c.label().is_none()));
    }

    #[test]
    fn rendering_is_deterministic() {
        let view = ViewState::new(2023).with_scene(Scene::Exploration);
        let config = StoryConfig::default();
        let a = render_scene(&dataset(), &view, &config);
        let b = render_scene(&dataset(), &view, &config);
        assert_eq!(a, b);
    }
}
