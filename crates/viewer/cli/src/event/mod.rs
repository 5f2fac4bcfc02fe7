//! Event loop driving playback ticks, store polling and keyboard input.
mod r#loop;

pub use r#loop::EventLoop;
