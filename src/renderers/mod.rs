//! Drawing surfaces and output formats.

pub mod canvas;
pub mod html;
pub mod svg;

pub use canvas::{Canvas2d, DrawOp, RecordingCanvas, Stroke};
