//! Parsing and normalization of external date service responses.
//!
//! The service answers every operation with the same XML envelope:
//!
//! ```text
//! <response>
//!   <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>
//!   <body><items><item>...</item><item>...</item></items></body>
//! </response>
//! ```
//!
//! Only result code `"00"` is success. The body may carry zero, one, or many
//! `<item>` elements; the parser always yields a `Vec`, so callers never see
//! a diverging single-result shape. Zero items (the range endpoint on a
//! no-match query omits the body entirely) parse to an empty vector.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ServiceError;
use crate::lunar::types::{LunarDate, SolarDate};

/// The service marks a leap month with this single Korean character.
/// Regular months carry "평", but the comparison is deliberately asymmetric:
/// only an exact match on the leap marker resolves to leap. Garbled
/// encodings have been observed in the wild, and defaulting an ambiguous
/// value to leap is the more dangerous failure mode.
pub const LEAP_MONTH_MARKER: &str = "윤";

/// Resolve a leap-month field value. Exact match on the leap marker only;
/// "평", empty, absent, and mojibake all resolve to non-leap.
pub fn is_leap_marker(value: Option<&str>) -> bool {
    value == Some(LEAP_MONTH_MARKER)
}

/// One `<item>` element, flattened to a tag -> text map.
pub type RawItem = HashMap<String, String>;

/// An item from the single-date conversion endpoints. Both calendar triples
/// are always present; the leap tag is present in practice but still parsed
/// through the asymmetric rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionItem {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub leap_month: bool,
}

/// An item from the fixed lunar-date range endpoint. Same fields as
/// [`ConversionItem`], but the leap tag is optional in the service schema;
/// absence resolves to non-leap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanItem {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub leap_month: bool,
}

/// Parse a service response envelope into its raw items.
///
/// Fails with [`ServiceError::Api`] on any non-"00" result code, carrying
/// the service's own `resultMsg` text, and with [`ServiceError::Xml`] on a
/// malformed document.
pub fn parse_response(xml: &str) -> Result<Vec<RawItem>, ServiceError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut result_code: Option<String> = None;
    let mut result_msg: Option<String> = None;
    let mut items: Vec<RawItem> = Vec::new();

    let mut current_item: Option<RawItem> = None;
    let mut current_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"item" {
                    current_item = Some(RawItem::new());
                }
                current_text.clear();
            }
            Ok(Event::Empty(e)) => {
                // A self-closing tag inside an item is an empty field.
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some(item) = current_item.as_mut() {
                    item.insert(name, String::new());
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| ServiceError::Xml(e.to_string()))?;
                current_text.push_str(&text);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match name.as_str() {
                    "item" => {
                        if let Some(item) = current_item.take() {
                            items.push(item);
                        }
                    }
                    "resultCode" => result_code = Some(current_text.clone()),
                    "resultMsg" => result_msg = Some(current_text.clone()),
                    // A closing tag while an item is open is one of its fields;
                    // container ends (items, body, response) arrive with no
                    // item open and fall through.
                    _ => {
                        if let Some(item) = current_item.as_mut() {
                            item.insert(name, current_text.clone());
                        }
                    }
                }
                current_text.clear();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ServiceError::Xml(e.to_string())),
        }
    }

    match result_code.as_deref() {
        Some("00") => Ok(items),
        Some(code) => Err(ServiceError::Api {
            code: code.to_string(),
            message: result_msg.unwrap_or_else(|| "no result message".to_string()),
        }),
        None => Err(ServiceError::Xml(
            "response header missing resultCode".to_string(),
        )),
    }
}

fn required_int(item: &RawItem, field: &str) -> Result<i64, ServiceError> {
    let text = item
        .get(field)
        .ok_or_else(|| ServiceError::MissingField(field.to_string()))?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::Xml(format!("field {field} is not a number: {text:?}")))
}

fn parse_dates(item: &RawItem) -> Result<(SolarDate, LunarDate), ServiceError> {
    let solar = SolarDate {
        year: required_int(item, "solYear")? as i32,
        month: required_int(item, "solMonth")? as u32,
        day: required_int(item, "solDay")? as u32,
    };
    let lunar = LunarDate {
        year: required_int(item, "lunYear")? as i32,
        month: required_int(item, "lunMonth")? as u32,
        day: required_int(item, "lunDay")? as u32,
    };
    Ok((solar, lunar))
}

impl ConversionItem {
    /// Build a conversion item from a raw single-date endpoint item.
    pub fn from_raw(item: &RawItem) -> Result<Self, ServiceError> {
        let (solar, lunar) = parse_dates(item)?;
        Ok(Self {
            solar,
            lunar,
            leap_month: is_leap_marker(item.get("lunLeapmonth").map(String::as_str)),
        })
    }
}

impl SpanItem {
    /// Build a span item from a raw range endpoint item. The leap field may
    /// be absent here; absence is non-leap.
    pub fn from_raw(item: &RawItem) -> Result<Self, ServiceError> {
        let (solar, lunar) = parse_dates(item)?;
        Ok(Self {
            solar,
            lunar,
            leap_month: is_leap_marker(item.get("lunLeapmonth").map(String::as_str)),
        })
    }
}
