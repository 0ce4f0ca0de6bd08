//! Process environment snapshot.

use std::env;

use tagver_core::Environment;

/// Copy the current process environment into an [`Environment`].
///
/// Variables whose name or value is not valid Unicode are left out.
pub fn process_environment() -> Environment {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
