//! HTTP-specific helpers shared by the route handlers.

pub mod etag;
