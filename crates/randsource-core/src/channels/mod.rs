//! The two entropy strategies.

pub mod device;
pub mod fallback;

pub use device::{ChannelHandle, DeviceChannel, HandleState};
pub use fallback::FallbackChannel;
