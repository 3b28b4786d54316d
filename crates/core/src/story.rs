use std::sync::Arc;

use evstory_protocol::Point;
use tracing::trace;

use crate::config::StoryConfig;
use crate::hit;
use crate::model::{Dataset, Scene, ViewState};
use crate::scene::{SceneFrame, render_scene};

/// The running story: a loaded dataset, the current view and the frame
/// currently on screen.
///
/// Every change replaces the view state and the frame wholesale; nothing
/// from a previous frame is carried into the next one.
#[derive(Debug, Clone)]
pub struct Story {
    dataset: Arc<Dataset>,
    config: StoryConfig,
    years: Vec<i32>,
    view: ViewState,
    frame: SceneFrame,
}

impl Story {
    /// Start on the trend scene with the configured initial year selected.
    pub fn new(dataset: Arc<Dataset>, config: StoryConfig) -> Self {
        let view = ViewState::new(config.initial_year);
        let frame = render_scene(&dataset, &view, &config);
        let years = dataset.years();
        Self {
            dataset,
            config,
            years,
            view,
            frame,
        }
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn frame(&self) -> &SceneFrame {
        &self.frame
    }

    /// Distinct dataset years, ascending, for the year selector.
    pub fn available_years(&self) -> &[i32] {
        &self.years
    }

    pub fn select_scene(&mut self, scene: Scene) -> &SceneFrame {
        self.apply(self.view.with_scene(scene))
    }

    /// Change the selected year; the current scene is re-rendered.
    pub fn select_year(&mut self, year: i32) -> &SceneFrame {
        self.apply(self.view.with_year(year))
    }

    pub fn next_scene(&mut self) -> &SceneFrame {
        self.select_scene(self.view.active_scene.next())
    }

    pub fn previous_scene(&mut self) -> &SceneFrame {
        self.select_scene(self.view.active_scene.previous())
    }

    /// Move `delta` steps through the dataset's years, stopping at either
    /// end. A selected year missing from the dataset snaps to the nearest
    /// year in the stepping direction.
    pub fn step_year(&mut self, delta: i32) -> &SceneFrame {
        let current = self.view.selected_year;
        let target = match self.years.binary_search(&current) {
            Ok(idx) => {
                let last = self.years.len().saturating_sub(1) as i64;
                let idx = (idx as i64 + i64::from(delta)).clamp(0, last) as usize;
                self.years.get(idx)
            }
            Err(insert) if delta > 0 => self.years.get(insert),
            Err(insert) if delta < 0 => insert.checked_sub(1).and_then(|i| self.years.get(i)),
            Err(_) => None,
        };
        match target.copied() {
            Some(year) if year != current => self.select_year(year),
            _ => &self.frame,
        }
    }

    /// Hover label under `point` in the current frame.
    pub fn hover(&self, point: Point) -> Option<&str> {
        hit::hit_test(&self.frame.commands, point)
    }

    fn apply(&mut self, view: ViewState) -> &SceneFrame {
        trace!(?view, "view state changed");
        self.view = view;
        self.frame = render_scene(&self.dataset, &self.view, &self.config);
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SalesRecord;

    fn story() -> Story {
        let record = |region: &str, year: i32, value: f64| SalesRecord {
            region: region.into(),
            year,
            parameter: "EV sales".into(),
            unit: "Vehicles".into(),
            value,
        };
        let dataset = Dataset::new(vec![
            record("World", 2021, 10.0),
            record("World", 2022, 20.0),
            record("World", 2023, 30.0),
            record("China", 2021, 5.0),
            record("China", 2023, 9.0),
            record("USA", 2023, 4.0),
        ]);
        Story::new(Arc::new(dataset), StoryConfig::default())
    }

    #[test]
    fn starts_on_trend_with_initial_year() {
        let story = story();
        assert_eq!(story.view().active_scene, Scene::Trend);
        assert_eq!(story.view().selected_year, 2023);
        assert_eq!(story.frame().scene, Scene::Trend);
        assert_eq!(story.available_years(), &[2021, 2022, 2023]);
    }

    #[test]
    fn year_change_rerenders_current_scene() {
        let mut story = story();
        story.select_scene(Scene::Exploration);
        let frame = story.select_year(2021);
        assert_eq!(frame.scene, Scene::Exploration);
        assert_eq!(frame.year, Some(2021));
        assert_eq!(story.view().active_scene, Scene::Exploration);
    }

    #[test]
    fn frame_is_replaced_wholesale() {
        let mut story = story();
        story.select_scene(Scene::Exploration);
        story.select_scene(Scene::Trend);
        let fresh = render_scene(&story.dataset, &story.view(), story.config());
        assert_eq!(story.frame(), &fresh);
    }

    #[test]
    fn step_year_clamps_at_ends() {
        let mut story = story();
        story.select_scene(Scene::Ranking);
        assert_eq!(story.step_year(1).year, Some(2023));
        assert_eq!(story.step_year(-1).year, Some(2022));
        assert_eq!(story.step_year(-5).year, Some(2021));
    }

    #[test]
    fn step_year_snaps_from_unknown_year() {
        let mut story = story();
        story.select_year(2019);
        story.step_year(1);
        assert_eq!(story.view().selected_year, 2021);
        story.select_year(2030);
        story.step_year(-1);
        assert_eq!(story.view().selected_year, 2023);
    }

    #[test]
    fn hover_reads_current_frame() {
        let mut story = story();
        story.select_scene(Scene::Exploration);
        let (center, label) = story
            .frame()
            .commands
            .iter()
            .find_map(|c| match c {
                evstory_protocol::RenderCommand::DrawCircle { center, label, .. } => {
                    Some((*center, label.clone()))
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(story.hover(center), label.as_deref());
        assert_eq!(story.hover(Point::new(-100.0, -100.0)), None);
    }
}
