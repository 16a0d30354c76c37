pub mod composer;
pub mod html;
pub mod templates;
