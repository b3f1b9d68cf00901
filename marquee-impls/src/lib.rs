mod tmdb;

pub use tmdb::*;
