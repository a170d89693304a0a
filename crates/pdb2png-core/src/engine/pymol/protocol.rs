//! Line protocol spoken with a PyMOL child process.
//!
//! PyMOL started with `-p` reads commands from stdin; a leading `/` runs the
//! rest of the line as Python. On startup we define a dispatcher that calls
//! `cmd.<name>(*args)` and answers with exactly one tagged line on the real
//! stdout: `@@ok <json result>` or `@@err <json message>`. Everything else
//! PyMOL prints is untagged and ignored by the parser.

use super::super::error::EngineError;
use std::fmt;

pub const REPLY_OK: &str = "@@ok";
pub const REPLY_ERR: &str = "@@err";

const DISPATCHER: &str = "__pdb2png_call";

/// Python lines that install the dispatcher.
pub const BOOTSTRAP: [&str; 3] = [
    "/import json, sys",
    "/from pymol import cmd",
    concat!(
        r#"/exec("def __pdb2png_call(name, *args):\n"#,
        r#"    try:\n"#,
        r#"        result = getattr(cmd, name)(*args)\n"#,
        r#"    except BaseException as exc:\n"#,
        r#"        line = '@@err ' + json.dumps(str(exc) or type(exc).__name__)\n"#,
        r#"    else:\n"#,
        r#"        line = '@@ok ' + json.dumps(result, default=str)\n"#,
        r#"    sys.__stdout__.write(line + '\\n')\n"#,
        r#"    sys.__stdout__.flush()\n", globals())"#,
    ),
];

/// A positional argument encoded as a Python literal.
#[derive(Debug, Clone, PartialEq)]
pub enum PyArg<'a> {
    Str(&'a str),
    Owned(String),
    Int(i64),
    Float(f64),
    Floats(Vec<f64>),
}

fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("float('nan')")
    } else if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        write!(f, "{}float('inf')", sign)
    } else {
        write!(f, "{:?}", value)
    }
}

fn write_str_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    // A JSON string literal is also a valid Python string literal.
    let encoded = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&encoded)
}

impl fmt::Display for PyArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PyArg::Str(s) => write_str_literal(f, s),
            PyArg::Owned(s) => write_str_literal(f, s),
            PyArg::Int(i) => write!(f, "{}", i),
            PyArg::Float(x) => write_float(f, *x),
            PyArg::Floats(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_float(f, *v)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Renders one dispatcher call as a single stdin line (without the newline).
pub fn command_line(function: &str, args: &[PyArg<'_>]) -> String {
    let mut line = format!("/{}({:?}", DISPATCHER, function);
    for arg in args {
        line.push_str(", ");
        line.push_str(&arg.to_string());
    }
    line.push(')');
    line
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok(serde_json::Value),
    Err(String),
}

/// Parses one stdout line. Untagged lines yield `Ok(None)`.
pub fn parse_reply(line: &str) -> Result<Option<Reply>, EngineError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (tag, payload) = match line.split_once(' ') {
        Some((tag, payload)) => (tag, payload),
        None => (line, ""),
    };
    match tag {
        REPLY_OK => serde_json::from_str(payload)
            .map(|v| Some(Reply::Ok(v)))
            .map_err(|e| EngineError::Protocol(format!("bad result payload '{}': {}", payload, e))),
        REPLY_ERR => {
            let message = serde_json::from_str::<String>(payload)
                .unwrap_or_else(|_| payload.to_string());
            Ok(Some(Reply::Err(message)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_line_quotes_strings_and_lists() {
        let line = command_line(
            "set_color",
            &[PyArg::Str("protein_color_A"), PyArg::Floats(vec![1.0, 0.5, 0.0])],
        );
        assert_eq!(
            line,
            r#"/__pdb2png_call("set_color", "protein_color_A", [1.0, 0.5, 0.0])"#
        );
    }

    #[test]
    fn string_arguments_are_escaped() {
        let line = command_line("load", &[PyArg::Owned(r#"dir "x"\a.pdb"#.to_string())]);
        assert_eq!(line, r#"/__pdb2png_call("load", "dir \"x\"\\a.pdb")"#);
    }

    #[test]
    fn numbers_render_as_python_literals() {
        assert_eq!(PyArg::Int(1600).to_string(), "1600");
        assert_eq!(PyArg::Float(5.0).to_string(), "5.0");
        assert_eq!(PyArg::Float(-0.25).to_string(), "-0.25");
        assert_eq!(PyArg::Float(f64::NEG_INFINITY).to_string(), "-float('inf')");
    }

    #[test]
    fn parses_ok_and_err_replies() {
        assert_eq!(
            parse_reply("@@ok [\"A\", \"B\"]\n").unwrap(),
            Some(Reply::Ok(json!(["A", "B"])))
        );
        assert_eq!(parse_reply("@@ok null").unwrap(), Some(Reply::Ok(json!(null))));
        assert_eq!(
            parse_reply("@@err \"Unknown color 'blurple'\"").unwrap(),
            Some(Reply::Err("Unknown color 'blurple'".to_string()))
        );
    }

    #[test]
    fn untagged_lines_are_ignored() {
        assert_eq!(parse_reply(" Ray: render time: 0.52 sec.").unwrap(), None);
        assert_eq!(parse_reply("").unwrap(), None);
        assert_eq!(parse_reply("@@okay").unwrap(), None);
    }

    #[test]
    fn malformed_ok_payload_is_a_protocol_error() {
        assert!(matches!(
            parse_reply("@@ok {not json"),
            Err(EngineError::Protocol(_))
        ));
    }

    #[test]
    fn bootstrap_defines_the_dispatcher() {
        assert!(BOOTSTRAP.iter().all(|line| line.starts_with('/')));
        assert!(BOOTSTRAP[2].contains(DISPATCHER));
        assert!(!BOOTSTRAP[2].contains('\n'));
    }
}
