use std::{fs, mem, path::PathBuf, rc::Rc};

use tracing::debug;

use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::BuiltinCall,
        },
        value::core::Value,
    },
};

/// A script file resolved against the interpreter's base directory and
/// read into memory.
struct Script {
    path: String,
    text: String,
}

/// Resolves and reads the script named by the `file` argument.
///
/// # Returns
/// `Ok(Err(exception))` when `file` is not a string, so the caller can hand
/// the exception back like any other bad argument.
///
/// # Errors
/// `ModuleLoad` if the file cannot be read.
fn load_script(interpreter: &Interpreter,
               call: &BuiltinCall<'_>)
               -> EvalResult<Result<Script, Value>> {
    let file = match call.arg("file") {
        Value::Str(file) => file,
        other => return Ok(Err(call.invalid_argument("file", "a String", &other))),
    };

    let path: PathBuf = interpreter.config.base_dir.join(&file);
    let path = path.display().to_string();
    debug!(function = call.name, path = %path, "loading script");

    let text = fs::read_to_string(&path).map_err(|e| {
                                            call.error(RuntimeErrorKind::ModuleLoad { path:   path.clone(),
                                                                                      reason: e.to_string(), })
                                        })?;
    Ok(Ok(Script { path, text }))
}

/// Stores `value` as the export of the running script.
///
/// The value reaches whoever started the script with `Run`. Calling
/// `Export` again replaces the previous value.
#[allow(clippy::unnecessary_wraps)]
pub fn export(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let value = call.arg("value");
    interpreter.export = Some(value.clone());
    Ok(value)
}

/// Runs a script in the caller's global context.
///
/// Everything the script defines at its top level becomes visible to the
/// caller afterwards.
///
/// # Errors
/// `ModuleLoad` if the file cannot be read, `ModuleFailed` if the script
/// fails to lex, parse or run.
pub fn include(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let script = match load_script(interpreter, call)? {
        Ok(script) => script,
        Err(exception) => return Ok(exception),
    };

    let globals = Context::root_of(&call.context);
    interpreter.run_in(&script.path, &script.text, &globals)
               .map_err(|e| {
                   call.error(RuntimeErrorKind::ModuleFailed { path:    script.path.clone(),
                                                               message: e.to_string(), })
               })?;
    Ok(Value::Null)
}

/// Runs a script in a fresh global context and returns its export.
///
/// The script shares the interpreter's streams and limits but none of the
/// caller's variables.
///
/// # Returns
/// The last value the script passed to `Export`, or `Null`.
///
/// # Errors
/// `ModuleLoad` if the file cannot be read, `ModuleFailed` if the script
/// fails to lex, parse or run.
pub fn run(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let script = match load_script(interpreter, call)? {
        Ok(script) => script,
        Err(exception) => return Ok(exception),
    };

    let globals: Rc<Context> = Interpreter::create_globals();
    let saved = interpreter.export.take();
    let result = interpreter.run_in(&script.path, &script.text, &globals);
    let exported = mem::replace(&mut interpreter.export, saved);

    result.map_err(|e| {
              call.error(RuntimeErrorKind::ModuleFailed { path:    script.path.clone(),
                                                          message: e.to_string(), })
          })?;
    Ok(exported.unwrap_or(Value::Null))
}
