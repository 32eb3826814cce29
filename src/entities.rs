//! Default HTML character-reference decoder.
//!
//! Decodes the full HTML5 named-entity table plus decimal and hexadecimal
//! references. Anything not recognised is left in place. Callers can inject
//! their own decoder into the converter.

use std::borrow::Cow;

/// Decode character references in `input`. Borrows when nothing changed.
pub fn decode(input: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(input)
}
