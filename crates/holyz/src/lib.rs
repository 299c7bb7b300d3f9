#![doc = include_str!("../../../README.md")]
#![expect(clippy::cast_possible_truncation, reason = "float-to-int narrowing is the language's cast rule")]
#![expect(clippy::float_cmp, reason = "dynamic equality compares floats exactly")]

mod arith;
mod builtins;
mod call;
mod class;
mod error;
mod exec;
mod expressions;
mod function;
mod heap;
mod io;
mod namespace;
mod ops;
mod parse;
mod prepare;
mod repl;
mod run;
mod value;

pub use crate::{
    error::{RunError, RunResult},
    heap::Heap,
    io::{CollectStringPrint, NoPrint, PrintWriter, StdPrint},
    repl::ReplSession,
    run::Interp,
    value::{Attrs, Instance, OptionValue, Pointer, ResultValue, Type, Value, Vec2},
};
