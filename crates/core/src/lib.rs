//! Data model, aggregation, scales and scene views for the EV sales story.
//!
//! Everything here is a pure transformation: a loaded [`model::Dataset`]
//! plus a [`model::ViewState`] go in, a [`scene::SceneFrame`] of
//! [`evstory_protocol::RenderCommand`]s comes out. Drawing surfaces (SVG,
//! terminal, browser) only ever consume command lists.

pub mod aggregate;
pub mod config;
pub mod format;
pub mod hit;
pub mod model;
pub mod parsers;
pub mod scale;
pub mod scene;
pub mod story;
pub mod svg;
pub mod views;

pub use config::{ConfigError, StoryConfig};
pub use model::{Dataset, SalesRecord, Scene, ViewState};
pub use scene::{SceneFrame, render_scene};
pub use story::Story;
