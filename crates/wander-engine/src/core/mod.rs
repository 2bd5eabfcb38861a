pub mod crowd;
pub mod food;
pub mod rng;
pub mod time;
