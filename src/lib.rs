//! # Positional parameter binding
//!
//! This library converts strongly typed application values into a uniform, positionally
//! indexed sequence of encoded parameters, ready to be handed to a parameterized statement
//! executor. It covers scalars of every common width, text, binary and character large
//! objects, temporal values, explicit nulls and ordered collections thereof.
//!
//! Values are bound by reference. [`Binder::refresh`] re-reads every bound variable and
//! re-encodes it in place, so a statement prepared once can be executed many times with
//! mutated variables in between.
//!
//! Collections have no native parameter type on the targeted backends. They are flattened
//! instead: each element is encoded like an individual scalar bind would encode it, and the
//! renderings are joined into a single text parameter with [`ELEMENT_DELIMITER`] between
//! elements. Whatever decodes the statement on the other side splits by the same convention.
//!
//! ```
//! use sql_binder::{Binder, Direction, TypeTag};
//!
//! let title = "Jurassic Park";
//! let year = 1993;
//! let mut binder = Binder::new();
//! binder.bind(0, &title);
//! binder.bind(1, &year);
//! binder.bind_null(2, TypeTag::Double);
//! binder.bind_slice(3, &[4, 8, 15], Direction::In)?;
//!
//! // `binder.parameters()` is the snapshot an executor would consume.
//! assert_eq!(4, binder.parameters().len());
//! assert_eq!(Some("4\n8\n15"), binder.parameters()[3].text_form());
//! # Ok::<(), sql_binder::Error>(())
//! ```

mod binder;
mod error;
mod execute;
mod flatten;
mod parameter;
mod to_sql;
mod value;

pub use self::{
    binder::{Binder, Direction, WhenNull},
    error::Error,
    execute::Execute,
    flatten::{ELEMENT_DELIMITER, FIELD_DELIMITER},
    parameter::{EncodedParameter, TypeTag},
    to_sql::ToSql,
    value::{Clob, Date, SqlValue, Time, Timestamp},
};
