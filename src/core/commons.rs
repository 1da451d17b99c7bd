// src/core/commons.rs

//! Small helpers for building argument strings.

/// Formats `(flag, value)` pairs as single-dash options: `-foo foo -bar bar`.
pub fn concat_args<K: AsRef<str>, V: AsRef<str>>(args: &[(K, V)]) -> String {
    args.iter()
        .map(|(flag, value)| format!("-{} {}", flag.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
