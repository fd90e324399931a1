pub mod price;
pub mod product_page;

pub use price::*;
pub use product_page::*;
