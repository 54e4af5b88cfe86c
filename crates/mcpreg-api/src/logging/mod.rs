//! Request logging infrastructure
//!
//! Each request is logged as one entry line and one exit line inside a span
//! carrying its trace id and route.

mod trace_context;

pub use trace_context::{RequestSpan, RouteKind, TraceContext, TraceId};
