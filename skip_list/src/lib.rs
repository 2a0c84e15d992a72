extern crate thiserror;
pub use error::CsklSkipListError;

mod arena;
mod error;
pub mod impls;
mod iter;
mod level;
pub mod skip_list;
pub(crate) type Result<T> = std::result::Result<T, CsklSkipListError>;
