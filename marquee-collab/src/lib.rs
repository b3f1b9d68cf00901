mod auth;
mod data;
mod form;
mod storage;
mod util;
mod wishlist;

#[cfg(test)]
mod test_support;

pub use auth::*;
pub use data::*;
pub use form::*;
pub use storage::*;
pub use wishlist::*;
