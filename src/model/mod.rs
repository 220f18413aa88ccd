//! Data carried through one content run, from stage outputs to the
//! persisted [`ContentResult`].

mod content;
mod image;
mod stage;

pub use content::{CaptionSet, ContentResult};
pub use image::{GeneratedImage, ImagePayload, ImageProvider};
pub use stage::{Stage, TaskOutput};
