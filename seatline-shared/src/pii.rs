use serde::{Serialize, Serializer};
use std::fmt;

/// Wrapper for customer data that must not appear verbatim in log output.
///
/// `Debug` and `Display` print a redacted form; serialization still emits the
/// real value since responses need it.
#[derive(Clone, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    /// Redacted rendering: for an email, the first character of the local part
    /// and the full domain survive (`j***@example.com`).
    pub fn redacted(&self) -> String {
        let value = self.0.as_ref();
        match value.split_once('@') {
            Some((local, domain)) => {
                let head: String = local.chars().take(1).collect();
                format!("{}***@{}", head, domain)
            }
            None if value.is_empty() => String::new(),
            None => "********".to_string(),
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.redacted())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
