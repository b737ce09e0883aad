pub mod canvas;
pub mod driver;
pub mod ember;
pub mod field;
pub mod field_params;
pub mod frame_clock;
pub mod menu;
pub mod readiness;
pub mod runner;
pub mod surface;
