use std::{
    collections::{LinkedList, VecDeque},
    ffi::c_char,
};

use log::debug;

use crate::{
    error::Error,
    execute::Execute,
    flatten,
    parameter::{EncodedParameter, TypeTag},
    to_sql::ToSql,
    value::SqlValue,
};

/// Direction a bound slot carries data in: into statement execution, out of it, or both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// The value flows from the application into the statement.
    #[default]
    In,
    /// The value flows from the statement back into the application.
    Out,
    /// The value flows in both directions.
    InOut,
}

/// Callback associated with a single bound position. Fired during [`Binder::refresh`] whenever
/// the value re-derived for that position turns out to be null.
pub type WhenNull<'a> = Box<dyn FnMut() + 'a>;

/// Accessor handle recorded for a bound position. Re-reading happens through the closure, so
/// the current value of the underlying application variable is observed at refresh time. The
/// lifetime is bounded by the owning binder, never a bare address.
struct Source<'a> {
    read: Box<dyn Fn() -> SqlValue<'a> + 'a>,
    direction: Direction,
    when_null: Option<WhenNull<'a>>,
}

/// Binds values to the numbered placeholders of a parameterized statement.
///
/// The binder owns a dense, positionally indexed store of [`EncodedParameter`]s. Binding at a
/// position beyond the current end grows the store, filling the gap with default parameters.
/// Binding an already bound position overwrites it in place.
///
/// Scalar binds capture an accessor over the caller's variable in addition to encoding the
/// value right away. [`Self::refresh`] re-reads every accessor and re-encodes in place, which
/// is how a statement prepared once can be executed repeatedly with mutated variables: call
/// [`Self::refresh`] after mutating and before handing [`Self::parameters`] to the executor.
///
/// ```
/// use sql_binder::{Binder, Direction};
///
/// let name = "Aurelia";
/// let age = 32;
/// let mut binder = Binder::new();
/// binder.bind(0, &name);
/// binder.bind(1, &age);
/// binder.bind_slice(2, &[1, 2, 3], Direction::In)?;
/// assert_eq!(3, binder.size());
/// # Ok::<(), sql_binder::Error>(())
/// ```
pub struct Binder<'a> {
    /// Dense store of encoded parameters, one per position. Same length as `sources`.
    parameters: Vec<EncodedParameter>,
    /// Accessor handles, per position. `None` for gap fillers, explicit nulls and flattened
    /// collections, which are not re-derived on refresh.
    sources: Vec<Option<Source<'a>>>,
}

impl<'a> Binder<'a> {
    pub fn new() -> Self {
        Binder {
            parameters: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Binds a value at the given position, as an input parameter without a null callback.
    pub fn bind<T>(&mut self, position: usize, value: &'a T)
    where
        T: ToSql + ?Sized,
    {
        self.bind_with(position, value, Direction::default(), None);
    }

    /// Binds a value at the given position, stating direction and an optional null callback.
    pub fn bind_with<T>(
        &mut self,
        position: usize,
        value: &'a T,
        direction: Direction,
        when_null: Option<WhenNull<'a>>,
    ) where
        T: ToSql + ?Sized,
    {
        self.bind_source(position, move || value.sql_value(), direction, when_null);
    }

    /// Binds an explicit accessor closure at the given position. This is the most general
    /// scalar bind. [`Self::refresh`] re-reads the closure, so it should report the current
    /// value of whatever it derives its result from.
    pub fn bind_source(
        &mut self,
        position: usize,
        read: impl Fn() -> SqlValue<'a> + 'a,
        direction: Direction,
        when_null: Option<WhenNull<'a>>,
    ) {
        let parameter = read().encode();
        self.grow_to(position);
        self.parameters[position] = parameter;
        self.sources[position] = Some(Source {
            read: Box::new(read),
            direction,
            when_null,
        });
    }

    /// Binds a null at the given position. The expected tag states which type the statement
    /// anticipates at that position. The resulting parameter is never confusable with the zero
    /// or empty value of that type.
    pub fn bind_null(&mut self, position: usize, expected: TypeTag) {
        self.grow_to(position);
        self.parameters[position] = EncodedParameter::null(expected);
        self.sources[position] = None;
    }

    /// Deliberately inert. Accepting a raw text pointer without ownership or length metadata
    /// cannot be verified and is a correctness hazard, so this bind intentionally does not
    /// touch the parameter store. Bind a `&str` instead.
    pub fn bind_text_ptr(&mut self, position: usize, _value: *const c_char) {
        debug!("ignoring raw text pointer bind at parameter position {position}");
    }

    /// Binds a random access sequence as one flattened collection parameter.
    pub fn bind_slice<T>(
        &mut self,
        position: usize,
        values: &[T],
        direction: Direction,
    ) -> Result<(), Error>
    where
        T: ToSql,
    {
        self.bind_collection(position, values, direction)
    }

    /// Binds a double ended sequence as one flattened collection parameter.
    pub fn bind_deque<T>(
        &mut self,
        position: usize,
        values: &VecDeque<T>,
        direction: Direction,
    ) -> Result<(), Error>
    where
        T: ToSql,
    {
        self.bind_collection(position, values, direction)
    }

    /// Binds a linked sequence as one flattened collection parameter.
    pub fn bind_list<T>(
        &mut self,
        position: usize,
        values: &LinkedList<T>,
        direction: Direction,
    ) -> Result<(), Error>
    where
        T: ToSql,
    {
        self.bind_collection(position, values, direction)
    }

    /// Binds any forward iterable sequence as one flattened collection parameter at the given
    /// position. The elements are encoded in iteration order and concatenated into a single
    /// text value (see [`crate::ELEMENT_DELIMITER`]). An empty sequence binds as the empty
    /// string.
    ///
    /// Collections are input only. Any other direction fails with
    /// [`Error::InvalidDirection`], and a failed bind leaves the store untouched.
    pub fn bind_collection<I>(
        &mut self,
        position: usize,
        elements: I,
        direction: Direction,
    ) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: ToSql,
    {
        if direction != Direction::In {
            return Err(Error::InvalidDirection { direction });
        }
        // Build the complete payload before touching the store, so an allocation failure
        // cannot leave a partial write behind.
        let payload = flatten::flattened_text(elements)?;
        debug!(
            "bound flattened collection parameter at position {position}, payload is {} bytes",
            payload.len()
        );
        self.grow_to(position);
        self.parameters[position] = EncodedParameter::flattened(payload);
        self.sources[position] = None;
        Ok(())
    }

    /// Number of positions in the store, including gap fillers for positions which have never
    /// been bound explicitly.
    pub fn size(&self) -> usize {
        self.parameters.len()
    }

    /// Ordered read-only view of all encoded parameters, for the executor to consume when
    /// issuing the statement. The borrow ends at the next mutation of the binder, so a stale
    /// view can never outlive a [`Self::refresh`].
    pub fn parameters(&self) -> &[EncodedParameter] {
        &self.parameters
    }

    /// Direction recorded for the given position, or `None` if the position holds no scalar
    /// bind.
    pub fn direction(&self, position: usize) -> Option<Direction> {
        self.sources
            .get(position)
            .and_then(|source| source.as_ref())
            .map(|source| source.direction)
    }

    /// Re-derives every bound value from its accessor and re-encodes it in place, in position
    /// order. Fires the null callback of each position whose re-derived value is null. Must be
    /// called after application side mutation and before [`Self::parameters`] is handed to the
    /// executor.
    ///
    /// Positions without an accessor (gap fillers, explicit nulls and flattened collections)
    /// keep their current value.
    pub fn refresh(&mut self) {
        for (parameter, source) in self.parameters.iter_mut().zip(&mut self.sources) {
            if let Some(source) = source {
                let value = (source.read)();
                if value.is_null()
                    && let Some(callback) = &mut source.when_null
                {
                    callback();
                }
                *parameter = value.encode();
            }
        }
    }

    /// Refreshes the store and hands the resulting snapshot to the executor. Equivalent to
    /// calling [`Self::refresh`] followed by [`Execute::execute`] on [`Self::parameters`].
    pub fn execute<E>(&mut self, executor: &mut E) -> Result<(), E::Error>
    where
        E: Execute,
    {
        self.refresh();
        executor.execute(&self.parameters)
    }

    /// Grows both columns of the store so `position` is addressable. New slots are filled with
    /// default parameters and no accessor.
    fn grow_to(&mut self, position: usize) {
        if position >= self.parameters.len() {
            self.parameters
                .resize_with(position + 1, EncodedParameter::default);
            self.sources.resize_with(position + 1, || None);
        }
    }
}

impl Default for Binder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::{LinkedList, VecDeque},
        ptr,
    };

    use super::{Binder, Direction};
    use crate::{Error, SqlValue, TypeTag, parameter::EncodedParameter};

    #[test]
    fn binding_beyond_the_end_grows_the_store() {
        let value = 42;
        let mut binder = Binder::new();

        binder.bind(3, &value);

        assert_eq!(4, binder.size());
        // Positions before the bound one are filled with default parameters.
        for gap in &binder.parameters()[..3] {
            assert_eq!(&EncodedParameter::default(), gap);
        }
        assert_eq!(Some("42"), binder.parameters()[3].text_form());
    }

    #[test]
    fn rebinding_a_position_overwrites_in_place() {
        let first = 1;
        let second = "two";
        let mut binder = Binder::new();

        binder.bind(0, &first);
        binder.bind(0, &second);

        assert_eq!(1, binder.size());
        assert_eq!(TypeTag::Text, binder.parameters()[0].type_tag());
        assert_eq!(Some("two"), binder.parameters()[0].text_form());
    }

    #[test]
    fn null_bind_keeps_the_expected_tag() {
        let mut binder = Binder::new();

        binder.bind_null(0, TypeTag::Int64);

        let parameter = &binder.parameters()[0];
        assert!(parameter.is_null());
        assert_eq!(TypeTag::Int64, parameter.type_tag());
        assert_eq!(None, parameter.text_form());
    }

    #[test]
    fn refresh_reflects_mutation_of_the_underlying_variable() {
        let value = Cell::new(1);
        let mut binder = Binder::new();
        binder.bind(0, &value);

        value.set(2);
        assert_eq!(Some("1"), binder.parameters()[0].text_form());
        binder.refresh();

        assert_eq!(Some("2"), binder.parameters()[0].text_form());
    }

    #[test]
    fn refresh_fires_null_callback_when_value_turns_null() {
        let value: Cell<Option<i32>> = Cell::new(Some(5));
        let fired = Cell::new(0);
        let mut binder = Binder::new();
        binder.bind_source(
            0,
            || match value.get() {
                Some(current) => SqlValue::Int32(current),
                None => SqlValue::Null(TypeTag::Int32),
            },
            Direction::In,
            Some(Box::new(|| fired.set(fired.get() + 1))),
        );

        binder.refresh();
        assert_eq!(0, fired.get());

        value.set(None);
        binder.refresh();

        assert_eq!(1, fired.get());
        assert!(binder.parameters()[0].is_null());
    }

    #[test]
    fn collection_binds_as_one_text_parameter() {
        let mut binder = Binder::new();

        binder.bind_slice(0, &[1, 2, 3], Direction::In).unwrap();

        assert_eq!(1, binder.size());
        let parameter = &binder.parameters()[0];
        assert_eq!(TypeTag::Text, parameter.type_tag());
        assert!(!parameter.is_null());
        assert_eq!(Some("1\n2\n3"), parameter.text_form());
    }

    #[test]
    fn empty_collection_binds_as_empty_text() {
        let no_values: Vec<i32> = Vec::new();
        let mut binder = Binder::new();

        binder.bind_slice(0, &no_values, Direction::In).unwrap();

        assert_eq!(Some(""), binder.parameters()[0].text_form());
    }

    #[test]
    fn all_three_collection_shapes_flatten_identically() {
        let slice = [1, 2, 3];
        let deque: VecDeque<i32> = slice.iter().copied().collect();
        let list: LinkedList<i32> = slice.iter().copied().collect();
        let mut binder = Binder::new();

        binder.bind_slice(0, &slice, Direction::In).unwrap();
        binder.bind_deque(1, &deque, Direction::In).unwrap();
        binder.bind_list(2, &list, Direction::In).unwrap();

        let parameters = binder.parameters();
        assert_eq!(parameters[0], parameters[1]);
        assert_eq!(parameters[0], parameters[2]);
    }

    #[test]
    fn output_collection_bind_is_rejected_and_leaves_store_unchanged() {
        let previous = 7;
        let mut binder = Binder::new();
        binder.bind(0, &previous);

        let result = binder.bind_slice(0, &[1, 2, 3], Direction::Out);

        assert!(matches!(
            result,
            Err(Error::InvalidDirection {
                direction: Direction::Out
            })
        ));
        assert_eq!(1, binder.size());
        assert_eq!(Some("7"), binder.parameters()[0].text_form());
    }

    #[test]
    fn in_out_collection_bind_is_rejected() {
        let mut binder = Binder::new();

        let result = binder.bind_slice(0, &[1], Direction::InOut);

        assert!(matches!(result, Err(Error::InvalidDirection { .. })));
        assert_eq!(0, binder.size());
    }

    #[test]
    fn flattening_grows_the_store_by_at_most_the_bound_position() {
        let mut binder = Binder::new();

        binder.bind_slice(0, &[1, 2, 3, 4, 5], Direction::In).unwrap();

        // Five elements, still exactly one parameter.
        assert_eq!(1, binder.size());
    }

    #[test]
    fn raw_text_pointer_bind_is_inert() {
        let mut binder = Binder::new();

        binder.bind_text_ptr(0, ptr::null());

        assert_eq!(0, binder.size());
    }

    #[test]
    fn direction_is_recorded_per_position() {
        let value = 1;
        let mut binder = Binder::new();
        binder.bind_with(0, &value, Direction::InOut, None);
        binder.bind_null(1, TypeTag::Int32);

        assert_eq!(Some(Direction::InOut), binder.direction(0));
        assert_eq!(None, binder.direction(1));
        assert_eq!(None, binder.direction(7));
    }

    #[test]
    fn refresh_leaves_flattened_collections_untouched() {
        let mut binder = Binder::new();
        binder.bind_slice(0, &[1, 2], Direction::In).unwrap();

        binder.refresh();

        assert_eq!(Some("1\n2"), binder.parameters()[0].text_form());
    }
}
