pub mod record;
pub mod scene;

pub use record::{Dataset, SalesRecord};
pub use scene::{Scene, ViewState};
