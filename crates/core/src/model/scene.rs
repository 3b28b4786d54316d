use serde::{Deserialize, Serialize};

/// Which of the three fixed visualizations is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Global sales over time.
    Trend,
    /// Top countries for the selected year.
    Ranking,
    /// Every country for the selected year, with hover labels.
    Exploration,
}

impl Scene {
    pub const ALL: [Scene; 3] = [Scene::Trend, Scene::Ranking, Scene::Exploration];

    /// Map a navigation index (0, 1, 2) to a scene.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Scene::Trend => 0,
            Scene::Ranking => 1,
            Scene::Exploration => 2,
        }
    }

    /// Stable identifier used for group ids and export file names.
    pub fn id(self) -> &'static str {
        match self {
            Scene::Trend => "trend",
            Scene::Ranking => "ranking",
            Scene::Exploration => "exploration",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the scene depends on the selected year.
    pub fn uses_year(self) -> bool {
        !matches!(self, Scene::Trend)
    }
}

/// What the user is looking at. Replaced, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub selected_year: i32,
    pub active_scene: Scene,
}

impl ViewState {
    /// Initial state: the trend scene with `selected_year` preselected.
    pub fn new(selected_year: i32) -> Self {
        Self {
            selected_year,
            active_scene: Scene::Trend,
        }
    }

    pub fn with_year(self, selected_year: i32) -> Self {
        Self {
            selected_year,
            ..self
        }
    }

    pub fn with_scene(self, active_scene: Scene) -> Self {
        Self {
            active_scene,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps() {
        assert_eq!(Scene::Trend.next(), Scene::Ranking);
        assert_eq!(Scene::Exploration.next(), Scene::Trend);
        assert_eq!(Scene::Trend.previous(), Scene::Exploration);
        assert_eq!(Scene::from_index(2), Some(Scene::Exploration));
        assert_eq!(Scene::from_index(3), None);
    }

    #[test]
    fn updates_produce_new_values() {
        let initial = ViewState::new(2023);
        let moved = initial.with_scene(Scene::Ranking).with_year(2020);
        assert_eq!(initial.active_scene, Scene::Trend);
        assert_eq!(initial.selected_year, 2023);
        assert_eq!(moved.active_scene, Scene::Ranking);
        assert_eq!(moved.selected_year, 2020);
    }
}
