//! Rendering for the document-writer boundary
//!
//! Markdown is the interchange format handed to the external serializer;
//! the core makes no assumption about the final document format beyond
//! "ordered text with attributable provenance".

pub mod procedure_render;

pub use procedure_render::render_procedure;
