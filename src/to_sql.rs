use std::cell::Cell;

use crate::{
    parameter::TypeTag,
    value::{Clob, Date, SqlValue, Time, Timestamp},
};

/// A value the binder knows how to encode into one parameter.
///
/// [`Self::sql_value`] is invoked once when the value is bound and again on every
/// [`crate::Binder::refresh`]. Implementations over interior mutable containers (see the
/// [`Cell`] implementations below) therefore allow a caller to bind once, mutate the
/// underlying variable and have the next refresh pick up the current value.
pub trait ToSql {
    /// Tag used when a null must be produced for this type without a value at hand, e.g. for
    /// the `None` variant of `Option<T>`.
    const TYPE_TAG: TypeTag;

    /// Current value, to be encoded into a parameter.
    fn sql_value(&self) -> SqlValue<'_>;
}

macro_rules! impl_to_sql_copy {
    ($t:ty, $variant:ident) => {
        impl ToSql for $t {
            const TYPE_TAG: TypeTag = TypeTag::$variant;

            fn sql_value(&self) -> SqlValue<'_> {
                SqlValue::$variant(*self)
            }
        }

        /// Binding through a `Cell` lets the caller mutate the variable between binding and
        /// refreshing, without fighting the shared borrow held by the binder.
        impl ToSql for Cell<$t> {
            const TYPE_TAG: TypeTag = TypeTag::$variant;

            fn sql_value(&self) -> SqlValue<'_> {
                SqlValue::$variant(self.get())
            }
        }
    };
}

impl_to_sql_copy!(i8, Int8);
impl_to_sql_copy!(u8, UInt8);
impl_to_sql_copy!(i16, Int16);
impl_to_sql_copy!(u16, UInt16);
impl_to_sql_copy!(i32, Int32);
impl_to_sql_copy!(u32, UInt32);
impl_to_sql_copy!(i64, Int64);
impl_to_sql_copy!(u64, UInt64);
impl_to_sql_copy!(bool, Bool);
impl_to_sql_copy!(char, Char);
impl_to_sql_copy!(f32, Float);
impl_to_sql_copy!(f64, Double);
impl_to_sql_copy!(Date, Date);
impl_to_sql_copy!(Time, Time);
impl_to_sql_copy!(Timestamp, Timestamp);

impl ToSql for str {
    const TYPE_TAG: TypeTag = TypeTag::Text;

    fn sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(self)
    }
}

impl ToSql for String {
    const TYPE_TAG: TypeTag = TypeTag::Text;

    fn sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(self)
    }
}

impl ToSql for [u8] {
    const TYPE_TAG: TypeTag = TypeTag::Blob;

    fn sql_value(&self) -> SqlValue<'_> {
        SqlValue::Blob(self)
    }
}

impl ToSql for Vec<u8> {
    const TYPE_TAG: TypeTag = TypeTag::Blob;

    fn sql_value(&self) -> SqlValue<'_> {
        SqlValue::Blob(self)
    }
}

impl ToSql for Clob<'_> {
    const TYPE_TAG: TypeTag = TypeTag::Clob;

    fn sql_value(&self) -> SqlValue<'_> {
        SqlValue::Clob(self.0)
    }
}

/// `None` is bound as a null tagged with the type the `Some` variant would have.
impl<T> ToSql for Option<T>
where
    T: ToSql,
{
    const TYPE_TAG: TypeTag = T::TYPE_TAG;

    fn sql_value(&self) -> SqlValue<'_> {
        match self {
            Some(value) => value.sql_value(),
            None => SqlValue::Null(T::TYPE_TAG),
        }
    }
}

impl<T> ToSql for &T
where
    T: ToSql + ?Sized,
{
    const TYPE_TAG: TypeTag = T::TYPE_TAG;

    fn sql_value(&self) -> SqlValue<'_> {
        (**self).sql_value()
    }
}
