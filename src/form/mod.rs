pub mod controller;
pub mod edit;
