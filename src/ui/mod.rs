pub mod color;
pub mod human;
pub mod outputter;
pub mod table;
pub mod text;
pub mod theme;

pub use color::{colorize, Color};
pub use human::HumanOutputter;
pub use outputter::{Outputter, UiError, UiResult};
pub use theme::OutputMode;
