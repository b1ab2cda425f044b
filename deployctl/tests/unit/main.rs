//! Integration tests run against scripted collaborators

mod common;
mod test_resolver;
mod test_streamer;
