use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use evstory_core::svg::render_svg;
use evstory_core::{Scene, Story};

/// File name a scene is exported under, e.g. `scene-1-ranking.svg`.
pub fn export_file_name(scene: Scene) -> String {
    format!("scene-{}-{}.svg", scene.index(), scene.id())
}

/// Render every scene for the story's selected year and write one SVG
/// per scene into `dir`. The story is left on the scene it started on.
pub fn export_scenes(story: &mut Story, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory '{}'", dir.display()))?;

    let start = story.view().active_scene;
    let canvas = story.config().canvas;
    let dark = story.config().dark;

    let mut written = Vec::with_capacity(Scene::ALL.len());
    for scene in Scene::ALL {
        let frame = story.select_scene(scene);
        let svg = render_svg(&frame.commands, &canvas, dark);
        let path = dir.join(export_file_name(scene));
        std::fs::write(&path, svg)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), scene = scene.id(), "exported scene");
        written.push(path);
    }
    story.select_scene(start);

    Ok(written)
}
