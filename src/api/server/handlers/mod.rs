pub mod directions;
pub mod places;
