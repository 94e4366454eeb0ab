//! Data model for outlines, NASA images, agent verdicts and finished slides.

pub mod image;
pub mod outline;
pub mod slide;

pub use image::{ImageSelection, NasaImage, ReviewResult};
pub use outline::{PresentationOutline, SlideOutlineItem};
pub use slide::{FinalSlide, Slideshow};
