use std::{cell::Cell, convert::Infallible};

use sql_binder::{Binder, Clob, Date, Direction, EncodedParameter, Execute, Timestamp, TypeTag};

fn init() {
    // Set environment to something like:
    // RUST_LOG=sql_binder=debug cargo test
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Executor standing in for the out of scope statement engine. Records the text forms of every
/// snapshot it is handed.
#[derive(Default)]
struct RecordingExecutor {
    executions: Vec<Vec<Option<String>>>,
}

impl Execute for RecordingExecutor {
    type Error = Infallible;

    fn execute(&mut self, parameters: &[EncodedParameter]) -> Result<(), Self::Error> {
        self.executions.push(
            parameters
                .iter()
                .map(|parameter| parameter.text_form().map(str::to_owned))
                .collect(),
        );
        Ok(())
    }
}

#[test]
fn bind_scalars_of_every_shape_and_execute() {
    init();
    let title = "Interstellar";
    let rating = 8.7f64;
    let release = Date {
        year: 2014,
        month: 11,
        day: 7,
    };
    let synopsis = Clob("A team travels through a wormhole in space.");
    let poster: Vec<u8> = vec![0x89, 0x50, 0x4e];
    let mut binder = Binder::new();
    binder.bind(0, &title);
    binder.bind(1, &rating);
    binder.bind(2, &release);
    binder.bind(3, &synopsis);
    binder.bind(4, &poster);
    binder.bind_null(5, TypeTag::Int32);
    let mut executor = RecordingExecutor::default();

    binder.execute(&mut executor).unwrap();

    let seen = &executor.executions[0];
    assert_eq!(Some("Interstellar".to_string()), seen[0]);
    assert_eq!(Some("8.7".to_string()), seen[1]);
    assert_eq!(Some("2014-11-07".to_string()), seen[2]);
    assert_eq!(
        Some("A team travels through a wormhole in space.".to_string()),
        seen[3]
    );
    assert_eq!(Some("\\x89504e".to_string()), seen[4]);
    // The explicit null has no payload.
    assert_eq!(None, seen[5]);
}

#[test]
fn repeated_execution_picks_up_mutated_variables() {
    init();
    let year = Cell::new(1993);
    let mut binder = Binder::new();
    binder.bind(0, &year);
    let mut executor = RecordingExecutor::default();

    binder.execute(&mut executor).unwrap();
    year.set(1997);
    binder.execute(&mut executor).unwrap();

    assert_eq!(Some("1993".to_string()), executor.executions[0][0]);
    assert_eq!(Some("1997".to_string()), executor.executions[1][0]);
}

#[test]
fn collections_travel_as_one_delimited_text_parameter() {
    init();
    let ids = [101, 102, 103];
    let mut binder = Binder::new();
    binder.bind_slice(0, &ids, Direction::In).unwrap();
    let mut executor = RecordingExecutor::default();

    binder.execute(&mut executor).unwrap();

    assert_eq!(vec![Some("101\n102\n103".to_string())], executor.executions[0]);
}

#[test]
fn timestamps_render_with_microsecond_precision() {
    init();
    let moment = Timestamp {
        year: 2024,
        month: 2,
        day: 29,
        hour: 12,
        minute: 30,
        second: 15,
        microsecond: 250_000,
    };
    let mut binder = Binder::new();
    binder.bind(0, &moment);

    assert_eq!(
        Some("2024-02-29 12:30:15.250000"),
        binder.parameters()[0].text_form()
    );
}

#[test]
fn rebinding_between_executions_replaces_the_parameter() {
    init();
    let first = 1;
    let flags = [true, false];
    let mut binder = Binder::new();
    binder.bind(0, &first);
    let mut executor = RecordingExecutor::default();
    binder.execute(&mut executor).unwrap();

    binder.bind_slice(0, &flags, Direction::In).unwrap();
    binder.execute(&mut executor).unwrap();

    assert_eq!(Some("1".to_string()), executor.executions[0][0]);
    assert_eq!(Some("true\nfalse".to_string()), executor.executions[1][0]);
}
