pub mod axis;
pub mod exploration;
pub mod ranking;
pub mod trend;
