pub mod check;
pub mod tag;
