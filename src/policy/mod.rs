pub mod lru;
pub mod splay;
