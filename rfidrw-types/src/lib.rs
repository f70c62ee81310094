//! Type definitions for rfidrw

pub mod error;
pub mod indicator;
pub mod reader_info;
pub mod token;

pub use error::{Error, Result};
pub use indicator::Indicator;
pub use reader_info::ReaderInfo;
pub use token::Token;
