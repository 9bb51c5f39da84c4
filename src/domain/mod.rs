pub mod article;
pub mod derived_fields;
pub mod locator;

pub use article::*;
pub use derived_fields::*;
pub use locator::*;
