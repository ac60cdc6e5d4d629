use std::fs;

use quill::{ScriptError, Session};
use walkdir::WalkDir;

fn run_program(source: &str) -> Result<String, ScriptError> {
    let mut output: Vec<u8> = Vec::new();
    let mut session = Session::new(&mut output);
    session.run(source)?;
    Ok(String::from_utf8(output).expect("program output is valid utf-8"))
}

fn assert_output(source: &str, expected: &str) {
    match run_program(source) {
        Ok(output) => assert_eq!(output, expected, "wrong output for:\n{source}"),
        Err(e) => panic!("script failed:\n{source}\nError: {e}"),
    }
}

fn assert_runtime_error(source: &str, needle: &str) {
    match run_program(source) {
        Ok(output) => panic!("script succeeded with output {output:?} but was expected to fail:\n{source}"),
        Err(ScriptError::Runtime(e)) => {
            let rendered = e.to_string();
            assert!(rendered.contains(needle),
                    "runtime error {rendered:?} does not mention {needle:?}");
        },
        Err(ScriptError::Syntax(errors)) => {
            panic!("expected a runtime error but got syntax errors {errors:?} for:\n{source}")
        },
    }
}

fn assert_syntax_error(source: &str) {
    match run_program(source) {
        Ok(_) => panic!("script parsed but was expected not to:\n{source}"),
        Err(ScriptError::Syntax(_)) => {},
        Err(ScriptError::Runtime(e)) => {
            panic!("expected a syntax error but got runtime error {e} for:\n{source}")
        },
    }
}

#[test]
fn arithmetic_precedence() {
    assert_output("print -1 + 2 * 3;", "5\n");
    assert_output("print (1 + 2) * 3;", "9\n");
    assert_output("print 1 - 2 - 3;", "-4\n");
    assert_output("print 8 / 2 / 2;", "2\n");
}

#[test]
fn string_concatenation() {
    assert_output("print \"foo\" + \"bar\";", "foobar\n");
    assert_output("var greeting = \"hello\"; print greeting + \", \" + \"world\";",
                  "hello, world\n");
}

#[test]
fn mixed_addition_is_a_runtime_error() {
    assert_runtime_error("print \"foo\" + 1;", "Operands must be two Number or two String");
    assert_runtime_error("print \"foo\" + 1;", "[line 1]");
    assert_runtime_error("print 1 + nil;", "Operands must be two Number or two String");
}

#[test]
fn lexical_closure_counts() {
    let source = "fun make() { var i = 0; fun inc() { i = i + 1; return i; } return inc; }\n\
                  var c = make();\n\
                  print c(); print c(); print c();";
    assert_output(source, "1\n2\n3\n");
}

#[test]
fn sibling_closures_share_their_environment() {
    let source = "fun make() {\n\
                      var value = 0;\n\
                      fun set(v) { value = v; }\n\
                      fun get() { return value; }\n\
                      set(7);\n\
                      print get();\n\
                  }\n\
                  make();";
    assert_output(source, "7\n");
}

#[test]
fn for_loop_counts() {
    assert_output("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn for_loop_without_clauses_still_runs() {
    assert_output("var i = 0; for (; i < 2;) { print i; i = i + 1; }", "0\n1\n");
}

#[test]
fn short_circuit_results_are_booleans() {
    assert_output("print false and (1 / 0);", "false\n");
    assert_output("print true or (1 / 0);", "true\n");
    assert_output("print 1 and 2;", "true\n");
    assert_output("print nil or false;", "false\n");
}

#[test]
fn short_circuit_skips_the_right_operand() {
    // `boom` is undefined: evaluating the right operand would error out.
    assert_output("print false and boom();", "false\n");
    assert_output("print true or boom();", "true\n");
}

#[test]
fn undefined_variable_reads_and_writes_fail() {
    assert_runtime_error("print x;", "Undefined variable 'x'");
    assert_runtime_error("print x;", "[line 1]");
    assert_runtime_error("x = 1;", "Undefined variable 'x'");
}

#[test]
fn assignment_yields_the_assigned_value() {
    assert_output("var a = 1; var b = 2; a = b = 5; print a; print b;", "5\n5\n");
}

#[test]
fn return_unwinds_through_nested_blocks() {
    assert_output("fun f() { { { return 42; } } }\nprint f();", "42\n");
}

#[test]
fn return_unwinds_out_of_loops() {
    let source = "fun first_over(limit) {\n\
                      for (var i = 0;; i = i + 1) {\n\
                          if (i > limit) return i;\n\
                      }\n\
                  }\n\
                  print first_over(3);";
    assert_output(source, "4\n");
}

#[test]
fn if_else_branches() {
    assert_output("if (2 + 2 == 4) print \"yes\"; else print \"no\";", "yes\n");
    assert_output("if (2 + 2 == 5) print \"yes\"; else print \"no\";", "no\n");
    assert_output("if (nil) print \"taken\";", "");
}

#[test]
fn block_scoping_shadows_and_restores() {
    assert_output("var foo = 42; { var foo = 24; print foo; } print foo;", "24\n42\n");
    assert_output("var foo = 2; { foo = foo + 1; } print foo;", "3\n");
}

#[test]
fn truthiness_of_zero_and_empty_string() {
    assert_output("if (0) print \"zero is truthy\";", "zero is truthy\n");
    assert_output("if (\"\") print \"empty is truthy\";", "empty is truthy\n");
}

#[test]
fn division_by_zero_prints_ieee_values() {
    assert_output("print 1 / 0;", "inf\n");
    assert_output("print -1 / 0;", "-inf\n");
    assert_output("print 0 / 0;", "NaN\n");
}

#[test]
fn printing_follows_value_conventions() {
    assert_output("print nil;", "nil\n");
    assert_output("print true; print false;", "true\nfalse\n");
    assert_output("print 5; print 4.25;", "5\n4.25\n");
    assert_output("print \"no quotes\";", "no quotes\n");
}

#[test]
fn recursion_works() {
    assert_output("fun fact(n) { if (n < 2) return 1; return n * fact(n - 1); }\nprint fact(6);",
                  "720\n");
}

#[test]
fn functions_are_first_class_values() {
    let source = "fun twice(f, x) { return f(f(x)); }\n\
                  fun add_one(n) { return n + 1; }\n\
                  print twice(add_one, 5);";
    assert_output(source, "7\n");
}

#[test]
fn clock_is_available_without_any_setup() {
    assert_output("print clock() >= 0;", "true\n");
}

#[test]
fn unary_operators() {
    assert_output("print -(-3);", "3\n");
    assert_output("print !true; print !nil; print !0;", "false\ntrue\nfalse\n");
    assert_runtime_error("print -\"text\";", "Operand must be a Number");
}

#[test]
fn comparisons_and_equality() {
    assert_output("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 4;",
                  "true\ntrue\nfalse\ntrue\n");
    assert_output("print 1 == 1; print 1 == 2; print \"a\" == \"a\"; print nil == nil;",
                  "true\nfalse\ntrue\ntrue\n");
    assert_output("print 0 == false; print \"\" == nil; print \"1\" == 1;",
                  "false\nfalse\nfalse\n");
    assert_runtime_error("print 1 < \"2\";", "Operands must be two Number");
}

#[test]
fn dangling_else_binds_to_the_nearest_if() {
    assert_output("if (true) if (false) print \"inner\"; else print \"else of inner\";",
                  "else of inner\n");
}

#[test]
fn malformed_programs_are_syntax_errors() {
    assert_syntax_error("print 1");
    assert_syntax_error("var 1 = 2;");
    assert_syntax_error("(1 + 2;");
    assert_syntax_error("\"unterminated");
    assert_syntax_error("print $;");
}

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "quill")
                                     })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                           panic!("Failed to read expected output {expected_path:?}: {e}")
                       });

        match run_program(&source) {
            Ok(output) => assert_eq!(output, expected, "output mismatch for {path:?}"),
            Err(e) => panic!("script {path:?} failed:\n{e}"),
        }
        count += 1;
    }

    assert!(count > 0, "no scripts found under tests/scripts");
}
