pub mod event;
pub mod scheduler;
pub mod step;
pub mod world;
