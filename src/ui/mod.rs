pub mod graphs;
pub mod playback;
pub mod selection;
pub mod windows;
