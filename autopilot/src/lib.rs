pub mod benchmark;
pub mod clock;
pub mod pilot;
pub mod runner;
pub mod session;
pub mod util;
