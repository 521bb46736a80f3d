//! XML helpers shared by the OOXML layer.
//!
//! Read-only parts are streamed straight from `quick-xml` events; parts that
//! are edited and written back go through the owned [`XmlDocument`] tree.
pub mod tree;

pub use tree::{XmlAttribute, XmlDocument, XmlElement, XmlNode};
