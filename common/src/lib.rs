pub mod kv;
pub mod test;
