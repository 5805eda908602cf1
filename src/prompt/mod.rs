// Declare submodules
mod ad_copy;
mod common;
mod image;

pub use ad_copy::ad_copy_prompt;
pub use common::*;
pub use image::persona_image_prompt;
