pub mod catalog;
pub mod price;
pub mod retry;
pub mod util;
