//! Host functions installed in the global scope at startup.

use std::rc::Rc;

use chrono::Utc;
use log::debug;

use crate::environment::Environment;
use crate::function::NativeFunction;
use crate::value::Value;

const NATIVES: &[NativeFunction] = &[
    NativeFunction {
        name: "clock",
        arity: 0,
        func: clock,
    },
    NativeFunction {
        name: "random",
        arity: 0,
        func: random,
    },
    NativeFunction {
        name: "floor",
        arity: 1,
        func: floor,
    },
];

/// Defines every native function in `globals`.
pub fn install(globals: &mut Environment) {
    for native in NATIVES {
        debug!("Defining native function '{}'", native.name);

        globals.define(
            native.name,
            Value::NativeFunction(Rc::new(NativeFunction {
                name: native.name,
                arity: native.arity,
                func: native.func,
            })),
        );
    }
}

/// Wall‑clock seconds since the Unix epoch.
fn clock(_args: &[Value]) -> Result<Value, String> {
    let micros = Utc::now().timestamp_micros();
    Ok(Value::Number(micros as f64 / 1_000_000.0))
}

/// Uniform number in `[0, 1)`.
fn random(_args: &[Value]) -> Result<Value, String> {
    Ok(Value::Number(fastrand::f64()))
}

fn floor(args: &[Value]) -> Result<Value, String> {
    match args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(n.floor())),
        other => Err(format!(
            "floor argument must be a number, got {}.",
            other.map_or("nothing", Value::type_name)
        )),
    }
}
