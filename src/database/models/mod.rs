pub mod golf_club;
pub mod golf_course;
pub mod golf_round;
pub mod hole;
pub mod tee_box;

pub use golf_club::{GolfClub, NewGolfClub};
pub use golf_course::{GolfCourse, NewGolfCourse};
pub use golf_round::{GolfRound, NewGolfRound, RoundStat};
pub use hole::{Hole, NewHole};
pub use tee_box::{NewTeeBox, TeeBox};

/// Hand each child to the parent whose id matches `parent_id(child)`
pub(crate) fn attach<P, C>(
    parents: &mut [P],
    children: Vec<C>,
    parent_id: impl Fn(&C) -> i32,
    id: impl Fn(&P) -> i32,
    slot: impl Fn(&mut P) -> &mut Vec<C>,
) {
    for child in children {
        let owner = parent_id(&child);
        if let Some(parent) = parents.iter_mut().find(|p| id(p) == owner) {
            slot(parent).push(child);
        }
    }
}
