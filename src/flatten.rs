//! Flattening of ordered collections into one delimited text payload.
//!
//! Backends without a native array parameter type can still receive an entire collection
//! through a single text placeholder. Each element is encoded with the same scalar encoding an
//! individual bind would use, and the renderings are concatenated with defined delimiters. The
//! receiving side splits the payload again by the same convention, so the delimiters are part
//! of the contract and must be produced bit exact.

use crate::{error::Error, to_sql::ToSql};

/// Separates the fields encoded from a single element. Scalar elements encode to exactly one
/// field, so this delimiter only shows up for element kinds which encode to several.
pub const FIELD_DELIMITER: char = '\t';

/// Separates successive elements of the collection.
pub const ELEMENT_DELIMITER: char = '\n';

/// Encodes the elements in iteration order into one payload. An empty collection yields the
/// empty string.
///
/// All growth of the payload uses fallible reservation. On allocation failure the error is
/// returned before anything has been written to a parameter store, which gives collection
/// binds their strong failure guarantee for free.
pub(crate) fn flattened_text<I>(elements: I) -> Result<String, Error>
where
    I: IntoIterator,
    I::Item: ToSql,
{
    let mut payload = String::new();
    let mut first = true;
    for element in elements {
        if !first {
            payload.try_reserve(ELEMENT_DELIMITER.len_utf8())?;
            payload.push(ELEMENT_DELIMITER);
        }
        first = false;
        append_element(&mut payload, &element)?;
    }
    Ok(payload)
}

/// Encodes one element the way the scalar dispatch would and appends its textual form. Null
/// elements have no text form and contribute an empty field.
fn append_element<T>(payload: &mut String, element: &T) -> Result<(), Error>
where
    T: ToSql + ?Sized,
{
    let parameter = element.sql_value().encode();
    if let Some(text) = parameter.text_form() {
        payload.try_reserve(text.len())?;
        payload.push_str(text);
    }
    Ok(())
}
