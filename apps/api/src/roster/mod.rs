// Department assignment screens and the filtered user list.

pub mod handlers;
pub mod projection;
