pub mod single;
pub mod barrier;
pub mod rayon_pool;
