pub mod frame_loop;
pub mod interval;
