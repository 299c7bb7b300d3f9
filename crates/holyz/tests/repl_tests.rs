//! Behavioural tests for the persistent REPL session.
//!
//! `ReplSession` keeps interpreter state across `eval_line` calls so
//! interactive snippets can share variables, functions, classes, and heap
//! objects.

use holyz::{CollectStringPrint, NoPrint, ReplSession};

// =============================================================================
// 1. Session creation
// =============================================================================

/// A fresh session starts with no variables defined.
#[test]
fn fresh_session_has_empty_scope() {
    let session = ReplSession::new();
    assert!(session.list_variables().is_empty());
}

// =============================================================================
// 2. Expressions and echoes
// =============================================================================

/// A bare arithmetic expression is evaluated and echoed.
#[test]
fn expression_is_echoed() {
    let mut session = ReplSession::new();
    let echo = session.eval_line("1 + 2", &mut NoPrint).unwrap();
    assert_eq!(echo.as_deref(), Some("3"));
}

/// Results rendering as empty or "0" are suppressed.
#[test]
fn zero_results_are_suppressed() {
    let mut session = ReplSession::new();
    assert_eq!(session.eval_line("0", &mut NoPrint).unwrap(), None);
    assert_eq!(session.eval_line("2 - 2", &mut NoPrint).unwrap(), None);
}

/// A declaration is a statement (no echo); reading the variable echoes it.
#[test]
fn declaration_then_read() {
    let mut session = ReplSession::new();
    assert_eq!(session.eval_line("int x = 42", &mut NoPrint).unwrap(), None);
    assert_eq!(session.eval_line("x", &mut NoPrint).unwrap().as_deref(), Some("42"));
    assert_eq!(session.eval_line("x + 1", &mut NoPrint).unwrap().as_deref(), Some("43"));
    assert_eq!(session.list_variables(), vec!["x".to_owned()]);
}

/// Compound assignment updates the session binding.
#[test]
fn compound_assignment_persists() {
    let mut session = ReplSession::new();
    session.eval_line("int n = 1", &mut NoPrint).unwrap();
    session.eval_line("n += 4", &mut NoPrint).unwrap();
    assert_eq!(session.eval_line("n", &mut NoPrint).unwrap().as_deref(), Some("5"));
}

// =============================================================================
// 3. Multi-line blocks
// =============================================================================

/// Lines buffer until braces balance; a function defined interactively is
/// callable afterwards.
#[test]
fn function_defined_across_lines() {
    let mut session = ReplSession::new();
    assert_eq!(session.eval_line("func double ( n ) {", &mut NoPrint).unwrap(), None);
    assert_eq!(session.eval_line("return n * 2", &mut NoPrint).unwrap(), None);
    assert_eq!(session.eval_line("}", &mut NoPrint).unwrap(), None);
    let echo = session.eval_line("double ( 21 )", &mut NoPrint).unwrap();
    assert_eq!(echo.as_deref(), Some("42"));
}

/// A class defined interactively can be instantiated and poked.
#[test]
fn class_defined_across_lines() {
    let mut session = ReplSession::new();
    for line in [
        "class Point {",
        "int x ;",
        "int y ;",
        "constructor(a,b) {",
        "this.x = a",
        "this.y = b",
        "}",
        "}",
    ] {
        session.eval_line(line, &mut NoPrint).unwrap();
    }
    session.eval_line("Point p = Point ( 3 , 4 )", &mut NoPrint).unwrap();
    let echo = session.eval_line("p.x + p.y", &mut NoPrint).unwrap();
    assert_eq!(echo.as_deref(), Some("7"));
}

/// A while block typed at the prompt runs once its braces close.
#[test]
fn while_block_at_the_prompt() {
    let mut session = ReplSession::new();
    let mut print = CollectStringPrint::new();
    session.eval_line("int i = 0", &mut print).unwrap();
    session.eval_line("while i < 2 {", &mut print).unwrap();
    session.eval_line("ZS.System.PrintLine ( i )", &mut print).unwrap();
    session.eval_line("i += 1", &mut print).unwrap();
    session.eval_line("}", &mut print).unwrap();
    assert_eq!(print.output(), "0\n1\n");
}

// =============================================================================
// 4. Pragmas and state
// =============================================================================

/// The pragma toggles Holy-C mode and confirms it; bare string lines then
/// auto-print.
#[test]
fn holyc_pragma_and_autoprint() {
    let mut session = ReplSession::new();
    let mut print = CollectStringPrint::new();
    let echo = session.eval_line("#holyc on", &mut print).unwrap();
    assert_eq!(echo.as_deref(), Some("Holy C mode enabled"));
    session.eval_line("\"Hello\"", &mut print).unwrap();
    assert_eq!(print.output(), "Hello\n");
    let echo = session.eval_line("#holyc off", &mut print).unwrap();
    assert_eq!(echo.as_deref(), Some("Holy C mode disabled"));
}

/// Heap allocations persist across lines.
#[test]
fn heap_persists_across_lines() {
    let mut session = ReplSession::new();
    session.eval_line("Pointer p = malloc ( 9 )", &mut NoPrint).unwrap();
    let echo = session.eval_line("deref ( p )", &mut NoPrint).unwrap();
    assert_eq!(echo.as_deref(), Some("9"));
    assert_eq!(session.interp().heap().len(), 1);
}

/// Builtin calls that print do so through the writer and echo nothing.
#[test]
fn print_builtin_echoes_nothing() {
    let mut session = ReplSession::new();
    let mut print = CollectStringPrint::new();
    let echo = session.eval_line("ZS.System.PrintLine ( 1 )", &mut print).unwrap();
    assert_eq!(echo, None);
    assert_eq!(print.output(), "1\n");
}
