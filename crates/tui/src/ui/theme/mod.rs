pub mod helpers;
pub mod roles;

pub use roles::Theme;
