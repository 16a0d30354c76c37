pub mod design;
pub mod resume;
