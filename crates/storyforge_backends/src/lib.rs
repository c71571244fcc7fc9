//! External generation service clients for Storyforge.
//!
//! The pipeline treats its generation backends as black boxes behind two
//! trait seams: [`ImageSynthesizer`] (prompt + dimensions in, raw image
//! bytes out) and [`SpeechSynthesizer`] (text + voice parameters in, raw
//! audio bytes out). Concrete clients here talk to free, rate-limited HTTP
//! services; every request carries a bounded timeout so a hung call fails
//! one scene, never the whole run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod image;
mod tts;

pub use catalog::VoiceCatalog;
pub use image::{ImageSynthesizer, PollinationsClient};
pub use tts::{EdgeTtsClient, SpeechSynthesizer, Voice};
