mod util;

mod dynamic_window;
mod no_reliability;
mod packet;
mod sim_time;
