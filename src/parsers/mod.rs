pub mod html;
pub mod search;
