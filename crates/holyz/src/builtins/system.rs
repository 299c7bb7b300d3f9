//! `ZS.System.*` builtins.

use std::process::Command;

use tracing::warn;

use crate::{
    error::RunResult,
    io::PrintWriter,
    parse::string_raw,
    value::{Value, Vec2},
};

/// Writes each argument, raw-string decoded, without a terminator.
pub(super) fn print(args: &[Value], print: &mut impl PrintWriter) -> RunResult<Value> {
    for arg in args {
        print.stdout_write(&string_raw(&arg.to_str()))?;
    }
    Ok(Value::Null)
}

/// Like [`print`], with a trailing newline.
pub(super) fn print_line(args: &[Value], print: &mut impl PrintWriter) -> RunResult<Value> {
    for arg in args {
        print.stdout_write(&string_raw(&arg.to_str()))?;
    }
    print.stdout_push('\n')?;
    Ok(Value::Null)
}

/// Shell passthrough: runs the command under `sh -c` with stderr folded into
/// stdout and returns the captured output.
pub(super) fn command(args: &[Value]) -> Value {
    let Some(cmd) = args.first() else {
        return Value::Null;
    };
    let cmd = string_raw(&cmd.to_str());
    match Command::new("sh").arg("-c").arg(format!("{cmd} 2>&1")).output() {
        Ok(output) => Value::Str(String::from_utf8_lossy(&output.stdout).into_owned()),
        Err(err) => {
            warn!("command '{cmd}' failed to start: {err}");
            Value::Str(String::new())
        }
    }
}

pub(super) fn vec2(args: &[Value]) -> Value {
    let x = args.first().unwrap_or(&Value::Null).to_float();
    let y = args.get(1).unwrap_or(&Value::Null).to_float();
    Value::Vec2(Vec2::new(x, y))
}
