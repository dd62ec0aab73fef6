use crate::error::{QcGuardError, Result};

/// Forward-only reader over a flat settings list.
pub struct Cursor<'a> {
    values: &'a [String],
    position: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(values: &'a [String]) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Take the next `width` values.
    ///
    /// # Errors
    /// Fails if fewer than `width` values remain.
    pub fn take(&mut self, width: usize, what: &str) -> Result<&'a [String]> {
        let end = self.position + width;
        if end > self.values.len() {
            return Err(QcGuardError::SchemaMigration(format!(
                "settings list ends at {} values while reading {what} ({width} values from position {})",
                self.values.len(),
                self.position
            )));
        }
        let slice = &self.values[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Take a single value.
    ///
    /// # Errors
    /// Fails if the list is exhausted.
    pub fn next_value(&mut self, what: &str) -> Result<&'a str> {
        self.take(1, what).map(|s| s[0].as_str())
    }

    /// Take a value that must be a non-negative count.
    ///
    /// # Errors
    /// Fails if the list is exhausted or the value is not a count.
    pub fn count(&mut self, what: &str) -> Result<usize> {
        let position = self.position;
        let raw = self.next_value(what)?;
        raw.trim().parse::<usize>().map_err(|_| {
            QcGuardError::SchemaMigration(format!(
                "expected {what} at position {position}, found '{raw}'"
            ))
        })
    }

    /// Require every value to have been consumed.
    ///
    /// # Errors
    /// Fails if values remain, meaning the declared counts do not match the list.
    pub fn finish(self) -> Result<()> {
        let remaining = self.values.len() - self.position;
        if remaining == 0 {
            Ok(())
        } else {
            Err(QcGuardError::SchemaMigration(format!(
                "{remaining} unexpected trailing values after position {}; \
                 declared flag and measurement counts do not match the list length",
                self.position
            )))
        }
    }
}
