// src/core/mod.rs

pub mod dom;
pub mod html;
pub mod net;
pub mod sanitize;

pub use dom::{Document, HtmlDocument, NodeId, Query, TextDocument};
pub use net::{HttpLoader, Loader};
