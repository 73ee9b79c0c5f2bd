/// Tags the value kind of an [`EncodedParameter`].
///
/// This is a closed set. A flattened collection is tagged [`TypeTag::Text`], since its payload
/// travels as one text scalar. [`TypeTag::Null`] doubles as the tag of default (never bound)
/// parameters, which fill the gaps when a later position is bound before an earlier one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeTag {
    /// 8 bit signed integer
    Int8,
    /// 8 bit unsigned integer
    UInt8,
    /// 16 bit signed integer
    Int16,
    /// 16 bit unsigned integer
    UInt16,
    /// 32 bit signed integer
    Int32,
    /// 32 bit unsigned integer
    UInt32,
    /// 64 bit signed integer
    Int64,
    /// 64 bit unsigned integer
    UInt64,
    /// Boolean
    Bool,
    /// A single character
    Char,
    /// Single precision floating point
    Float,
    /// Double precision floating point
    Double,
    /// UTF-8 text of arbitrary length
    Text,
    /// Binary large object
    Blob,
    /// Character large object
    Clob,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Date combined with time of day
    Timestamp,
    /// Explicitly bound null, or a parameter which has never been bound
    #[default]
    Null,
}

/// Authoritative payload of an [`EncodedParameter`]. Exactly one form is populated per
/// parameter; null and default parameters carry no payload at all.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Payload {
    /// Owned wire representation of a scalar value.
    Buffer(Vec<u8>),
    /// Delimited text payload of a flattened collection.
    Text(String),
}

/// One unit of the parameter store: a single value, encoded into the representation the
/// statement executor sends over the wire.
///
/// Instances are created exclusively by [`crate::Binder`]. The executor consumes them in
/// position order through [`crate::Binder::parameters`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedParameter {
    type_tag: TypeTag,
    is_null: bool,
    payload: Option<Payload>,
}

impl EncodedParameter {
    /// A scalar parameter owning the wire representation of its value.
    pub(crate) fn scalar(type_tag: TypeTag, buffer: Vec<u8>) -> Self {
        EncodedParameter {
            type_tag,
            is_null: false,
            payload: Some(Payload::Buffer(buffer)),
        }
    }

    /// A null parameter. Carries the tag the statement expects at its position, but no
    /// payload. Distinct from the zero or empty value of that tag.
    pub(crate) fn null(type_tag: TypeTag) -> Self {
        EncodedParameter {
            type_tag,
            is_null: true,
            payload: None,
        }
    }

    /// A flattened collection. The payload is the delimited text produced by the flattener.
    pub(crate) fn flattened(text: String) -> Self {
        EncodedParameter {
            type_tag: TypeTag::Text,
            is_null: false,
            payload: Some(Payload::Text(text)),
        }
    }

    /// Value kind this parameter has been bound as.
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// `true` if this parameter has been bound as null. The payload is void then, regardless
    /// of the type tag.
    pub fn is_null(&self) -> bool {
        self.is_null
    }

    /// Raw bytes of the wire representation. `None` for null and never bound parameters, and
    /// for flattened collections, whose payload is text (see [`Self::text_form`]).
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Some(Payload::Buffer(buffer)) => Some(buffer),
            _ => None,
        }
    }

    /// Textual form of the payload. Scalar buffers hold the UTF-8 rendering of their value, so
    /// this is populated for both scalars and flattened collections. `None` for null and never
    /// bound parameters.
    pub fn text_form(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Buffer(buffer)) => std::str::from_utf8(buffer).ok(),
            Some(Payload::Text(text)) => Some(text),
            None => None,
        }
    }
}
