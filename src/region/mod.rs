mod assign;
mod select;

pub use assign::{assign, assign_with, Assignment, SINGLE_REGION};
pub use select::select_regions;
