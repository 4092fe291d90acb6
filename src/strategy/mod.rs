pub mod estimation;
pub mod periodic;
