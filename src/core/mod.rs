pub mod clock;
pub mod gpu_context;
pub mod input_adapter;
pub mod timer;
