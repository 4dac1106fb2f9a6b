//! Content module - documents, rich text, and the post query

mod document;
mod error;
pub mod loader;
pub mod query;
mod richtext;

pub use document::{
    Dimensions, Document, ImageCaptionPrimary, ImageCaptionSlice, ImageField, Meta, QuotePrimary,
    QuoteSlice, Slice, TextPrimary, TextSlice,
};
pub use error::ContentError;
pub use richtext::{BlockKind, RichText, RichTextBlock, Span, SpanData, SpanKind};
