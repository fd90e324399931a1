pub mod price;
pub mod product;

pub use price::*;
pub use product::*;

// Fixed report texts
pub const OUT_OF_STOCK: &str = "Out of stock";
pub const NO_UPDATES: &str = "Oops! no updates for today.";
pub const DEFAULT_BOT_NAME: &str = "Price";
