pub mod backends;
pub mod extract;
