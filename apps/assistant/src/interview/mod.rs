// Interview: candidate profile, tech stack, generated questions and the answer walk.
// Session logic lives in the pure reducer (session.rs); flow.rs drives it against the
// session store and the question generator.

pub mod flow;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod questions;
pub mod session;
