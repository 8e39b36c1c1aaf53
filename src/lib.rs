pub mod model;
pub mod repository;
pub mod stats;
pub mod util;
