use polycalc::{
    Operation, ParseOptions, Polynomial, Repl, SessionEnd,
    repl::{FAREWELL, Input, LineSource, ScriptSource, WELCOME},
};

fn run_session(script: &str) -> (SessionEnd, String) {
    let mut repl = Repl::new(ScriptSource::from_text(script), Vec::new());
    let end = repl.run().expect("session should not fail");
    let output = String::from_utf8(repl.into_output()).expect("utf-8 output");
    (end, output)
}

#[test]
fn binary_operation_then_quit() {
    let (end, output) = run_session("3 + 4x + 5x^2 + 9x^3\n+\n9 + 12x + 3x^2\nquit\n");
    assert_eq!(end, SessionEnd::Quit);
    assert!(output.starts_with(WELCOME));
    assert!(output.contains("12 + 16x + 8x^2 + 9x^3\n"));
    assert!(output.trim_end().ends_with(FAREWELL));
}

#[test]
fn derivative_skips_second_polynomial() {
    let (end, output) = run_session("3x^3 - 4x + 5\nd\nx^2\nD\nEXIT\n");
    assert_eq!(end, SessionEnd::Quit);
    assert!(output.contains("-4 + 9x^2\n"));
    assert!(output.contains("2x\n"));
}

#[test]
fn bad_polynomial_is_reported_and_reprompted() {
    let (_, output) = run_session("x + y\nx^2 + + 1\n2x\n*\nx\nquit\n");
    assert!(output.contains("only one variable is allowed"));
    assert_eq!(output.matches("Please re-enter.").count(), 2);
    assert!(output.contains("2x^2\n"));
    assert!(output.contains("\n  x + y\n      ^\n"));
}

#[test]
fn overflow_does_not_end_session() {
    let (end, output) = run_session("3037000500x\n*\n3037000500x\nx\nD\nquit\n");
    assert_eq!(end, SessionEnd::Quit);
    let squared = 3_037_000_500i64.wrapping_mul(3_037_000_500);
    assert!(output.contains(&format!("{squared}x^2\n")));
    assert!(output.contains("1\n"));
}

#[test]
fn unknown_operation_is_reported() {
    let (_, output) = run_session("x\n/\n-\n1\nquit\n");
    assert!(output.contains("Error: unrecognized operation '/'. Please re-enter."));
    assert!(output.contains("-1 + x\n"));
}

#[test]
fn end_of_input_without_farewell() {
    let (end, output) = run_session("x\n+\n");
    assert_eq!(end, SessionEnd::EndOfInput);
    assert!(!output.contains(FAREWELL));
}

#[test]
fn quit_is_recognized_at_every_prompt() {
    for script in ["quit", "x\nQuit", "x\n+\n exit "] {
        let (end, _) = run_session(script);
        assert_eq!(end, SessionEnd::Quit, "script {script:?}");
    }
}

#[test]
fn options_limit_degree() {
    let source = ScriptSource::from_text("x^9\nquit\n");
    let mut repl =
        Repl::new(source, Vec::new()).with_options(ParseOptions::default().with_max_degree(4));
    repl.run().expect("session");
    let output = String::from_utf8(repl.into_output()).expect("utf-8 output");
    assert!(output.contains("exceeds the maximum supported degree of 4"));
}

#[test]
fn script_source_classifies_lines() {
    let mut source = ScriptSource::new(vec!["x^2".to_string(), "QUIT".to_string()]);
    assert_eq!(
        source.read_line("> ").unwrap(),
        Input::Line("x^2".to_string())
    );
    assert_eq!(source.read_line("> ").unwrap(), Input::Quit);
    assert_eq!(source.read_line("> ").unwrap(), Input::Eof);
}

#[test]
fn operations_parse_and_apply() {
    assert_eq!("+".parse::<Operation>(), Ok(Operation::Add));
    assert_eq!("d".parse::<Operation>(), Ok(Operation::Derivative));
    assert!("x".parse::<Operation>().is_err());

    let p = Polynomial::new(vec![1, 1]);
    assert_eq!(
        Operation::Multiply.apply(&p, Some(&p)),
        Some(Polynomial::new(vec![1, 2, 1]))
    );
    assert_eq!(Operation::Subtract.apply(&p, None), None);
    assert_eq!(
        Operation::Derivative.apply(&p, None),
        Some(Polynomial::new(vec![1]))
    );
}
