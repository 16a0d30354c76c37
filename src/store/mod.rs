pub mod kv;
pub mod persistence;
