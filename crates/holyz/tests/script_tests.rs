//! End-to-end script execution tests.
//!
//! Each test feeds a complete script through `Interp::run_script` and checks
//! the collected stdout, the way an embedding host would.

use holyz::{CollectStringPrint, Interp, Value};
use pretty_assertions::assert_eq;

/// Runs a script and returns everything it printed.
fn run(source: &str) -> String {
    let mut print = CollectStringPrint::new();
    let mut interp = Interp::new();
    interp.run_script(source, &mut print).expect("script should run");
    print.into_output()
}

// =============================================================================
// 1. Core scenarios
// =============================================================================

/// Integer arithmetic observes precedence and prints without a decimal point.
#[test]
fn arithmetic_declaration() {
    let out = run("int x = 2 + 3 * 4\nZS.System.PrintLine ( x )");
    assert_eq!(out, "14\n");
}

/// A user function is registered by the loader and callable from the body.
#[test]
fn function_call() {
    let out = run("func square ( n ) {\nreturn n * n\n}\nZS.System.PrintLine ( square ( 5 ) )");
    assert_eq!(out, "25\n");
}

/// A while loop re-evaluates its predicate before every iteration.
#[test]
fn while_loop_counts() {
    let out = run("int i = 0\nwhile i < 3 {\nZS.System.PrintLine ( i )\ni += 1\n}");
    assert_eq!(out, "0\n1\n2\n");
}

/// `+` between strings concatenates; quotes are stripped on print.
#[test]
fn string_concatenation() {
    let out = run("string s = \"hi \"\nZS.System.PrintLine ( s + \"world\" )");
    assert_eq!(out, "hi world\n");
}

/// Holy-C mode auto-prints a bare string literal at statement position.
#[test]
fn holyc_mode_autoprints() {
    let out = run("#holyc on\n\"Hello\"");
    assert_eq!(out, "Hello\n");
}

/// `#holyc off` stops the auto-printing again.
#[test]
fn holyc_mode_toggles_off() {
    let out = run("#holyc on\n\"yes\"\n#holyc off\n\"no\"");
    assert_eq!(out, "yes\n");
}

/// malloc/deref/setvalue/free round-trip through the simulated heap.
#[test]
fn pointer_roundtrip() {
    let out = run(concat!(
        "Pointer p = malloc ( 42 )\n",
        "ZS.System.PrintLine ( deref ( p ) )\n",
        "setvalue ( p , 7 )\n",
        "ZS.System.PrintLine ( deref ( p ) )\n",
        "free ( p )",
    ));
    assert_eq!(out, "42\n7\n");
}

/// Err carries its kind; unwrapOr falls back to the default.
#[test]
fn result_err_and_unwrap_or() {
    let out = run(concat!(
        "Result r = Err ( \"bad\" , \"IOError\" )\n",
        "ZS.System.PrintLine ( isErr ( r ) )\n",
        "ZS.System.PrintLine ( unwrapOr ( r , 99 ) )",
    ));
    assert_eq!(out, "true\n99\n");
}

// =============================================================================
// 2. Control flow
// =============================================================================

/// `return` inside an if inside a while unwinds to the function's caller.
#[test]
fn return_unwinds_through_nested_blocks() {
    let out = run(concat!(
        "func find ( limit ) {\n",
        "int i = 0\n",
        "while i < limit {\n",
        "if i == 2 {\n",
        "return i\n",
        "}\n",
        "i += 1\n",
        "}\n",
        "return 99\n",
        "}\n",
        "ZS.System.PrintLine ( find ( 10 ) )",
    ));
    assert_eq!(out, "2\n");
}

/// `break` inside a nested if exits only the innermost loop.
#[test]
fn break_exits_innermost_loop_only() {
    let out = run(concat!(
        "int i = 0\n",
        "while i < 10 {\n",
        "if i == 3 {\n",
        "break\n",
        "}\n",
        "i += 1\n",
        "}\n",
        "ZS.System.PrintLine ( i )",
    ));
    assert_eq!(out, "3\n");
}

/// `continue` aborts the current iteration at while-body level; lines after
/// it never run, but the loop keeps going.
#[test]
fn continue_skips_rest_of_iteration() {
    let out = run(concat!(
        "int i = 0\n",
        "int hits = 0\n",
        "while i < 3 {\n",
        "i += 1\n",
        "continue\n",
        "hits += 1\n",
        "}\n",
        "ZS.System.PrintLine ( i )\n",
        "ZS.System.PrintLine ( hits )",
    ));
    assert_eq!(out, "3\n0\n");
}

/// Exactly one branch of if/else executes, in the `} else {` style.
#[test]
fn else_branch_runs_when_false() {
    let out = run(concat!(
        "int x = 1\n",
        "if x == 2 {\n",
        "ZS.System.PrintLine ( then )\n",
        "} else {\n",
        "ZS.System.PrintLine ( otherwise )\n",
        "}",
    ));
    assert_eq!(out, "otherwise\n");
}

/// `else` on its own line after the closing brace also works.
#[test]
fn else_on_following_line() {
    let out = run(concat!(
        "int x = 2\n",
        "if x == 2 {\n",
        "ZS.System.PrintLine ( then )\n",
        "}\n",
        "else {\n",
        "ZS.System.PrintLine ( otherwise )\n",
        "}",
    ));
    assert_eq!(out, "then\n");
}

// =============================================================================
// 3. Scoping
// =============================================================================

/// A local declaration shadows a same-named global for reads and compound
/// writes, and leaves the global untouched.
#[test]
fn local_shadows_global() {
    let out = run(concat!(
        "int x = 10\n",
        "func shadow ( ) {\n",
        "int x = 1\n",
        "x += 5\n",
        "return x\n",
        "}\n",
        "ZS.System.PrintLine ( shadow ( ) )\n",
        "ZS.System.PrintLine ( x )",
    ));
    assert_eq!(out, "6\n10\n");
}

/// Function parameters bind positionally; extra arguments are dropped.
#[test]
fn extra_arguments_are_dropped() {
    let out = run(concat!(
        "func first ( a ) {\n",
        "return a\n",
        "}\n",
        "ZS.System.PrintLine ( first ( 1 , 2 , 3 ) )",
    ));
    assert_eq!(out, "1\n");
}

/// `global TYPE NAME = expr` inside a function writes to the global table.
#[test]
fn global_declaration_inside_function() {
    let out = run(concat!(
        "func setup ( ) {\n",
        "global int g = 7\n",
        "return 0\n",
        "}\n",
        "setup ( )\n",
        "ZS.System.PrintLine ( g )",
    ));
    assert_eq!(out, "7\n");
}

// =============================================================================
// 4. Classes, messaging, traits
// =============================================================================

/// Construction seeds attributes, the constructor runs through send, and
/// methods read `this`.
#[test]
fn class_constructor_and_send() {
    let out = run(concat!(
        "class Point {\n",
        "int x ;\n",
        "int y ;\n",
        "constructor(a,b) {\n",
        "this.x = a\n",
        "this.y = b\n",
        "}\n",
        "sum() {\n",
        "return this.x + this.y\n",
        "}\n",
        "}\n",
        "Point p = Point ( 3 , 4 )\n",
        "ZS.System.PrintLine ( send ( p , sum ) )\n",
        "ZS.System.PrintLine ( p.x )",
    ));
    assert_eq!(out, "7\n3\n");
}

/// hasmethod sees class methods; getmethod yields the resolved name.
#[test]
fn method_reflection() {
    let out = run(concat!(
        "class Dog {\n",
        "speak() {\n",
        "return \"woof\"\n",
        "}\n",
        "}\n",
        "Dog d = Dog ( )\n",
        "ZS.System.PrintLine ( hasmethod ( d , speak ) )\n",
        "ZS.System.PrintLine ( hasmethod ( d , fly ) )\n",
        "ZS.System.PrintLine ( getmethod ( d , speak ) )",
    ));
    assert_eq!(out, "true\nfalse\nspeak\n");
}

/// Static attributes live on the class, are mutable through dotted
/// assignment, and are visible without an instance.
#[test]
fn static_attributes() {
    let out = run(concat!(
        "class Counter {\n",
        "static int total = 0 ;\n",
        "}\n",
        "Counter.total += 5\n",
        "ZS.System.PrintLine ( Counter.total )",
    ));
    assert_eq!(out, "5\n");
}

/// Methods and static attributes resolve through the superclass chain.
#[test]
fn superclass_lookup() {
    let out = run(concat!(
        "class Animal {\n",
        "string kind ;\n",
        "name() {\n",
        "return \"animal\"\n",
        "}\n",
        "}\n",
        "class Dog : Animal {\n",
        "int legs ;\n",
        "}\n",
        "Dog d = Dog ( )\n",
        "ZS.System.PrintLine ( send ( d , name ) )",
    ));
    assert_eq!(out, "animal\n");
}

/// When the class has no matching method, send falls back to trait impls.
#[test]
fn trait_impl_fallback() {
    let out = run(concat!(
        "trait Greeter {\n",
        "greet() ;\n",
        "}\n",
        "class Robot {\n",
        "string name ;\n",
        "}\n",
        "impl Greeter for Robot {\n",
        "greet() {\n",
        "return \"beep\"\n",
        "}\n",
        "}\n",
        "Robot r = Robot ( )\n",
        "ZS.System.PrintLine ( send ( r , greet ) )",
    ));
    assert_eq!(out, "beep\n");
}

// =============================================================================
// 5. Builtins
// =============================================================================

/// The ZS.Math table: rounding truncates, lerp interpolates, abs keeps ints.
#[test]
fn zs_math_surface() {
    let out = run(concat!(
        "ZS.System.PrintLine ( ZS.Math.Round ( 3.7 ) )\n",
        "ZS.System.PrintLine ( ZS.Math.Lerp ( 0 , 10 , 0.5 ) )\n",
        "ZS.System.PrintLine ( ZS.Math.Abs ( 0 - 5 ) )",
    ));
    assert_eq!(out, "3\n5\n5\n");
}

/// Builtin names resolve case-insensitively.
#[test]
fn builtin_names_are_case_insensitive() {
    let out = run(concat!(
        "int x = 1 + 2\n",
        "zs.system.printline ( TOINT ( x ) )\n",
        "ZS.System.PrintLine ( typeof ( x ) )",
    ));
    assert_eq!(out, "3\nint\n");
}

/// typeof and typecheck report canonical type names.
#[test]
fn reflection_builtins() {
    let out = run(concat!(
        "int x = 2 + 2\n",
        "ZS.System.PrintLine ( typeof ( x ) )\n",
        "ZS.System.PrintLine ( typecheck ( int , x ) )\n",
        "ZS.System.PrintLine ( istype ( float , x ) )",
    ));
    assert_eq!(out, "int\ntrue\nfalse\n");
}

/// Calls nest: arguments of a call can themselves be calls, on both
/// evaluator paths.
#[test]
fn nested_calls() {
    let out = run(concat!(
        "func square ( n ) {\n",
        "return n * n\n",
        "}\n",
        "ZS.System.PrintLine ( square ( square ( 2 ) ) )\n",
        "ZS.System.PrintLine ( square ( 2 ) + square ( 3 ) )",
    ));
    assert_eq!(out, "16\n13\n");
}

/// The deprecated bare `print` statement still works.
#[test]
fn deprecated_print_statement() {
    let out = run("print \"old style\"");
    assert_eq!(out, "old style\n");
}

/// SplitThread is acknowledged and executes nothing.
#[test]
fn split_thread_is_a_stub() {
    let out = run("SplitThread work ( )\nZS.System.PrintLine ( done )");
    assert_eq!(out, "done\n");
}

// =============================================================================
// 6. Option/Result laws
// =============================================================================

#[test]
fn result_laws() {
    let mut print = CollectStringPrint::new();
    let mut interp = Interp::new();
    let is_ok = interp.eval_expression("isOk ( Ok ( 5 ) )", &mut print).unwrap();
    assert_eq!(is_ok, Value::Bool(true));
    let is_err = interp.eval_expression("isErr ( Ok ( 5 ) )", &mut print).unwrap();
    assert_eq!(is_err, Value::Bool(false));
    let unwrapped = interp.eval_expression("unwrap ( Ok ( 7 ) )", &mut print).unwrap();
    assert_eq!(unwrapped.to_int(), 7);
    let fallback = interp
        .eval_expression("unwrapOr ( Err ( oops ) , 9 )", &mut print)
        .unwrap();
    assert_eq!(fallback.to_int(), 9);
    let unwrapped_err = interp.eval_expression("unwrap ( Err ( oops ) )", &mut print).unwrap();
    assert_eq!(unwrapped_err, Value::Null, "unwrap on Err warns and yields null");
}

#[test]
fn option_laws() {
    let mut print = CollectStringPrint::new();
    let mut interp = Interp::new();
    let is_some = interp.eval_expression("isSome ( Some ( 1 ) )", &mut print).unwrap();
    assert_eq!(is_some, Value::Bool(true));
    let is_none = interp.eval_expression("isNone ( None ( ) )", &mut print).unwrap();
    assert_eq!(is_none, Value::Bool(true));
    let not_none = interp.eval_expression("isNone ( Some ( 1 ) )", &mut print).unwrap();
    assert_eq!(not_none, Value::Bool(false));
}

// =============================================================================
// 7. Heap and determinism
// =============================================================================

/// malloc addresses are pairwise distinct; free erases exactly one cell.
#[test]
fn heap_addresses_are_unique() {
    let mut print = CollectStringPrint::new();
    let mut interp = Interp::new();
    interp
        .run_script(
            concat!(
                "Pointer a = malloc ( 1 )\n",
                "Pointer b = malloc ( 2 )\n",
                "Pointer c = malloc ( 3 )\n",
                "free ( b )",
            ),
            &mut print,
        )
        .unwrap();
    let address = |name: &str| match interp.global(name) {
        Some(Value::Pointer(p)) => p.address,
        other => panic!("{name} should be a pointer, got {other:?}"),
    };
    let (a, b, c) = (address("a"), address("b"), address("c"));
    assert!(a != b && b != c && a != c);
    assert_eq!(interp.heap().len(), 2);
    assert!(!interp.heap().contains(b), "freed cell is gone");
}

/// Repeated interpretation of the same script yields identical output.
#[test]
fn interpretation_is_deterministic() {
    let source = concat!(
        "func fib ( n ) {\n",
        "if n < 2 {\n",
        "return n\n",
        "}\n",
        "return fib ( n - 1 ) + fib ( n - 2 )\n",
        "}\n",
        "int i = 0\n",
        "while i < 8 {\n",
        "ZS.System.PrintLine ( fib ( i ) )\n",
        "i += 1\n",
        "}",
    );
    assert_eq!(run(source), run(source));
}

/// Vec2 supports componentwise access and mutation.
#[test]
fn vec2_components() {
    let out = run(concat!(
        "Vec2 v = ZS.System.Vec2 ( 1 , 2 )\n",
        "v.x += 3\n",
        "ZS.System.PrintLine ( v.x )\n",
        "ZS.System.PrintLine ( v.y )",
    ));
    assert_eq!(out, "4\n2\n");
}

/// Compound operators on scalars coerce through floats.
#[test]
fn compound_operators() {
    let out = run(concat!(
        "int n = 10\n",
        "n -= 4\n",
        "n *= 2\n",
        "n /= 3\n",
        "ZS.System.PrintLine ( n )",
    ));
    assert_eq!(out, "4\n");
}

/// `include` pulls definitions and statements from the referenced file.
#[test]
fn include_loads_definitions() {
    let path = std::env::temp_dir().join(format!("holyz_include_{}.hz", std::process::id()));
    std::fs::write(&path, "func inc ( n ) {\nreturn n + 1\n}\n").unwrap();
    let source = format!("include {}\nZS.System.PrintLine ( inc ( 41 ) )", path.display());
    assert_eq!(run(&source), "42\n");
    let _ = std::fs::remove_file(&path);
}

/// A missing include target is a critical error, not a warning.
#[test]
fn missing_include_is_critical() {
    let mut print = CollectStringPrint::new();
    let mut interp = Interp::new();
    let err = interp.run_script("include /no/such/file.hz", &mut print);
    assert!(err.is_err());
}

/// Runaway recursion is stopped by the call-depth limit instead of
/// overflowing the host stack.
#[test]
fn unbounded_recursion_is_limited() {
    let mut print = CollectStringPrint::new();
    let mut interp = Interp::new();
    let err = interp.run_script("func loop ( ) {\nreturn loop ( )\n}\nloop ( )", &mut print);
    assert!(matches!(err, Err(holyz::RunError::RecursionLimit { .. })));
}
