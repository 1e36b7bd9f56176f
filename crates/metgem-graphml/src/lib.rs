#![forbid(unsafe_code)]

//! GraphML parse/write for attributed similarity networks.
//!
//! GraphML types values through `<key>` declarations; the parser converts data
//! to the matching [`metgem_graph::AttrValue`] variant (malformed numerics fall
//! back to zero rather than failing the whole document), and the writer infers
//! key declarations back from the attribute values. Only the subset the
//! application exchanges is covered: typed graph/node/edge data on a single
//! undirected graph.

pub mod error;
mod parse;
mod write;

pub use error::{Error, Result};
pub use parse::{parse_file, parse_str};
pub use write::{to_string, write_file};

pub(crate) const NAMESPACE_URI: &str = "http://graphml.graphdrawing.org/xmlns";
pub(crate) const XSI_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub(crate) const SCHEMA_LOCATION: &str =
    "http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";
