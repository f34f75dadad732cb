// Adapters layer: concrete implementations of the domain ports (thirtyfour sessions, driver process, status probe).

pub mod capabilities;
pub mod driver_process;
pub mod status;
pub mod webdriver;
