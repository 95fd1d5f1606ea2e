// One module per resource family; route wiring lives in `app`.
pub mod golf_club;
pub mod golf_course;
pub mod golf_round;
pub mod health;
pub mod utils;
