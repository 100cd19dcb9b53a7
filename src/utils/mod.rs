pub mod csv;
pub mod fallback;
pub mod time;
pub mod validation;
