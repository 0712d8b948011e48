//! `ComicInfo.xml` encoding.
//!
//! Output is canonical: an XML declaration naming UTF-8, a `<ComicInfo>`
//! root carrying the `xsi`/`xsd` namespace declarations, two-space
//! indentation and elements in schema order. Elements that hold the schema
//! default are omitted, so equal metadata always encodes to equal bytes.
//!
//! Decoding accepts a leading byte order mark, matches enumerated values
//! without regard to case and ignores elements it does not know.

use crate::error::MetadataError;
use crate::mapper::{from_wire, to_wire};
use crate::model::ComicInfo;
use crate::wire::ComicInfoXml;
use serde::Serialize;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";
const ROOT: &str = "ComicInfo";
const BOM: char = '\u{feff}';

/// Encode metadata as `ComicInfo.xml` bytes.
///
/// Fails only when the community rating cannot be represented.
pub fn to_xml(info: &ComicInfo) -> Result<Vec<u8>, MetadataError> {
    let wire = to_wire(info)?;
    Ok(encode(&wire)?.into_bytes())
}

/// Decode `ComicInfo.xml` bytes.
pub fn from_xml(bytes: &[u8]) -> Result<ComicInfo, MetadataError> {
    decode(bytes).map(from_wire)
}

fn encode(wire: &ComicInfoXml) -> Result<String, MetadataError> {
    let mut xml = String::from(DECLARATION);
    let mut serializer = quick_xml::se::Serializer::with_root(&mut xml, Some(ROOT))?;
    serializer.indent(' ', 2);
    wire.serialize(serializer)?;
    Ok(xml)
}

fn decode(bytes: &[u8]) -> Result<ComicInfoXml, MetadataError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(BOM).unwrap_or(text);
    Ok(quick_xml::de::from_str(text)?)
}
