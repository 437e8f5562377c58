//! Conversion of Python objects into Rust values.
use anyhow::{Context, Result};
use ckpt_eval_core::InfoValue;
use numpy::PyArrayDyn;
use pyo3::{
    types::{IntoPyDict, PyBool, PyDict, PyFloat, PyList, PyLong, PyString, PyTuple},
    AsPyPointer, PyAny, PyNativeType, Python,
};

/// Nesting deeper than this is not descended into.
const MAX_DEPTH: usize = 64;

/// Converts an array-like Python object into a flat vector of `f64`.
///
/// Anything `numpy.asarray` accepts works: numpy arrays of any shape and numeric type,
/// nested lists, Python scalars. The elements are taken in row-major order.
pub fn to_f64_vec(py: Python, obj: &PyAny) -> Result<Vec<f64>> {
    let np = py.import("numpy")?;
    let kwargs = [("dtype", "float64")].into_py_dict(py);
    let arr = np
        .getattr("ascontiguousarray")?
        .call((obj,), Some(kwargs))
        .context("Failed to convert a Python object into an array of float64")?
        .call_method1("reshape", (-1,))?;
    let arr: &PyArrayDyn<f64> = arr.extract()?;
    let values = arr.readonly().as_array().iter().copied().collect();
    Ok(values)
}

/// Converts a Python object into an [`InfoValue`].
///
/// `None`, `bool`, `int`, `float`, `str`, `dict`, `list` and `tuple` map to their
/// counterparts. Objects having a `tolist()` method, like numpy arrays and numpy scalars, are
/// converted through it. Dictionary keys other than strings become their `str()`.
/// Anything else, including integers beyond the range of `i64`, becomes
/// [`InfoValue::Opaque`] with the `repr()` of the object.
///
/// This function never fails.
pub fn to_info_value(obj: &PyAny) -> InfoValue {
    info_value(obj, 0)
}

fn info_value(obj: &PyAny, depth: usize) -> InfoValue {
    if depth > MAX_DEPTH {
        return opaque(obj);
    }

    if is_none(obj) {
        InfoValue::Null
    } else if let Ok(v) = obj.downcast::<PyBool>() {
        InfoValue::Bool(v.is_true())
    } else if obj.downcast::<PyLong>().is_ok() {
        match obj.extract::<i64>() {
            Ok(v) => InfoValue::Int(v),
            Err(_) => opaque(obj),
        }
    } else if let Ok(v) = obj.downcast::<PyFloat>() {
        InfoValue::Float(v.value())
    } else if let Ok(v) = obj.downcast::<PyString>() {
        InfoValue::String(v.to_string_lossy().into_owned())
    } else if let Ok(dict) = obj.downcast::<PyDict>() {
        InfoValue::Map(
            dict.iter()
                .map(|(k, v)| (key(k), info_value(v, depth + 1)))
                .collect(),
        )
    } else if let Ok(list) = obj.downcast::<PyList>() {
        InfoValue::List(list.iter().map(|v| info_value(v, depth + 1)).collect())
    } else if let Ok(tuple) = obj.downcast::<PyTuple>() {
        InfoValue::List(tuple.iter().map(|v| info_value(v, depth + 1)).collect())
    } else if obj.hasattr("tolist").unwrap_or(false) {
        match obj.call_method0("tolist") {
            Ok(v) => info_value(v, depth + 1),
            Err(_) => opaque(obj),
        }
    } else {
        opaque(obj)
    }
}

fn is_none(obj: &PyAny) -> bool {
    obj.as_ptr() == obj.py().None().as_ptr()
}

fn key(obj: &PyAny) -> String {
    match obj.downcast::<PyString>() {
        Ok(s) => s.to_string_lossy().into_owned(),
        Err(_) => match obj.str() {
            Ok(s) => s.to_string_lossy().into_owned(),
            Err(_) => describe(obj),
        },
    }
}

fn opaque(obj: &PyAny) -> InfoValue {
    InfoValue::Opaque(describe(obj))
}

fn describe(obj: &PyAny) -> String {
    match obj.repr() {
        Ok(s) => s.to_string_lossy().into_owned(),
        Err(_) => "<unrepresentable object>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_info() {
        Python::with_gil(|py| {
            let obj = py
                .eval(
                    "{'success': True, 'steps': 3, 'dist': 0.5, 'name': 'rejoin', \
                      'pos': (1, 2.5), 'failure': None, 7: [False]}",
                    None,
                    None,
                )
                .unwrap();
            let info = to_info_value(obj);
            assert_eq!(
                info,
                InfoValue::Map(vec![
                    ("success".to_string(), InfoValue::Bool(true)),
                    ("steps".to_string(), InfoValue::Int(3)),
                    ("dist".to_string(), InfoValue::Float(0.5)),
                    ("name".to_string(), InfoValue::String("rejoin".to_string())),
                    (
                        "pos".to_string(),
                        InfoValue::List(vec![InfoValue::Int(1), InfoValue::Float(2.5)])
                    ),
                    ("failure".to_string(), InfoValue::Null),
                    ("7".to_string(), InfoValue::List(vec![InfoValue::Bool(false)])),
                ])
            );
        });
    }

    #[test]
    fn test_unserializable_info() {
        Python::with_gil(|py| {
            let obj = py
                .eval("{'obj': object(), 'big': 2 ** 70, 'nan': float('nan')}", None, None)
                .unwrap();
            let json = to_info_value(obj).to_json();
            assert!(json["obj"].as_str().unwrap().starts_with("<object object at"));
            assert_eq!(json["big"], "1180591620717411303424");
            assert_eq!(json["nan"], "NaN");
        });
    }
}
