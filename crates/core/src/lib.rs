#![deny(warnings)]

pub mod config;
pub mod emotion;
pub mod face;
pub mod feedback;
pub mod frame;
pub mod history;
pub mod movement;
pub mod pipeline;
pub mod session;
pub mod summary;
pub mod text;
pub mod trend;
pub mod util;
