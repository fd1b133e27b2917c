pub mod jma_api;

pub use jma_api::JmaApi;
