//! Browser bridge: the page fetches the CSV, hands the bytes over once, and
//! then drives scene and year changes through these functions. Frames come
//! back as JSON render commands or as a ready-to-insert SVG string.

use std::sync::{Arc, Mutex};

use evstory_core::parsers::parse_sales_csv;
use evstory_core::svg;
use evstory_core::{Scene, SceneFrame, Story, StoryConfig};
use evstory_protocol::Point;
use serde::Serialize;
use wasm_bindgen::prelude::*;

static STORY: Mutex<Option<Story>> = Mutex::new(None);

fn with_story<T>(f: impl FnOnce(&mut Story) -> Result<T, JsError>) -> Result<T, JsError> {
    let mut guard = STORY
        .lock()
        .map_err(|_| JsError::new("story state poisoned"))?;
    let story = guard
        .as_mut()
        .ok_or_else(|| JsError::new("no dataset loaded"))?;
    f(story)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn frame_json(frame: &SceneFrame) -> Result<String, JsError> {
    to_json(frame)
}

/// Parse the sales CSV and start the story on the trend scene.
///
/// `config_json` may override any `StoryConfig` field; pass an empty
/// string for defaults. Returns the number of in-scope records.
#[wasm_bindgen]
pub fn load_dataset(data: &[u8], config_json: &str) -> Result<usize, JsError> {
    let config = if config_json.trim().is_empty() {
        StoryConfig::default()
    } else {
        StoryConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?
    };
    let dataset = parse_sales_csv(data, &config).map_err(|e| JsError::new(&e.to_string()))?;
    let count = dataset.len();

    let mut guard = STORY
        .lock()
        .map_err(|_| JsError::new("story state poisoned"))?;
    *guard = Some(Story::new(Arc::new(dataset), config));
    Ok(count)
}

/// The frame currently on screen, as JSON.
#[wasm_bindgen]
pub fn current_frame() -> Result<String, JsError> {
    with_story(|story| frame_json(story.frame()))
}

/// Switch to scene `index` (0 trend, 1 ranking, 2 exploration).
#[wasm_bindgen]
pub fn select_scene(index: usize) -> Result<String, JsError> {
    let scene =
        Scene::from_index(index).ok_or_else(|| JsError::new(&format!("unknown scene: {index}")))?;
    with_story(|story| frame_json(story.select_scene(scene)))
}

/// Change the selected year; re-renders the current scene.
#[wasm_bindgen]
pub fn select_year(year: i32) -> Result<String, JsError> {
    with_story(|story| frame_json(story.select_year(year)))
}

/// Years present in the dataset, for populating the year selector.
#[wasm_bindgen]
pub fn available_years() -> Result<Vec<i32>, JsError> {
    with_story(|story| Ok(story.available_years().to_vec()))
}

/// The current frame as a standalone SVG document.
#[wasm_bindgen]
pub fn render_svg() -> Result<String, JsError> {
    with_story(|story| {
        let config = story.config();
        Ok(svg::render_svg(
            &story.frame().commands,
            &config.canvas,
            config.dark,
        ))
    })
}

/// Hover label at canvas coordinates `(x, y)`, if a mark is there.
#[wasm_bindgen]
pub fn hover(x: f64, y: f64) -> Result<Option<String>, JsError> {
    with_story(|story| Ok(story.hover(Point::new(x, y)).map(str::to_string)))
}
