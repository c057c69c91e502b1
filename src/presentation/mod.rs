pub mod render;

pub use render::{render_catalog, render_prediction, Notice, Tone};
