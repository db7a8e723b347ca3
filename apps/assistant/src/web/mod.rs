// Browser surface: a single server-rendered page per session plus its form posts.

pub mod handlers;
pub mod render;
