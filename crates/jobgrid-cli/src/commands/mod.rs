pub mod count;
pub mod expand;
pub mod show;
