pub mod default;
pub mod skip_list;
