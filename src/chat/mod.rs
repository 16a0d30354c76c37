pub mod gateway;
pub mod prompts;
pub mod service;
