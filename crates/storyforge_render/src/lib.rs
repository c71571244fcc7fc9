//! ffmpeg process drivers for Storyforge.
//!
//! Two operations, both shelling out to `ffmpeg`: [`SceneClipRenderer`]
//! turns a still image plus narration audio into a short Ken Burns clip,
//! and [`VideoConcatenator`] stitches rendered clips into a final video.
//! Every invocation runs under a hard timeout; the child is killed on every
//! exit path, so a wedged encode can never hang a run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clip;
mod command;
mod concat;

pub use clip::{ClipRenderer, SceneClipRenderer};
pub use concat::{Concatenator, VideoConcatenator};
