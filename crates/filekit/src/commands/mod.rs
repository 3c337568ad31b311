pub mod copy;
pub mod delete;
pub mod expand;
pub mod map;
pub mod matches;
