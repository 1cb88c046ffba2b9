pub mod html;

pub use html::clean;
