pub mod invoker;
pub mod models;
