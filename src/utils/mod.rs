pub mod error;
pub mod html;
pub mod logger;
pub mod money;
pub mod validation;
