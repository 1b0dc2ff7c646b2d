// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The acting operator identity.
///
/// Passed explicitly into every workflow call; the workflow never reads
/// ambient or global session state. A missing session is represented as
/// `None` at the call site and fails validation before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The operator's unique identifier.
    operator_id: String,
    /// The operator's display name.
    display_name: String,
}

impl SessionContext {
    /// Creates a new `SessionContext`.
    ///
    /// # Arguments
    ///
    /// * `operator_id` - The operator's unique identifier
    /// * `display_name` - The operator's display name
    #[must_use]
    pub const fn new(operator_id: String, display_name: String) -> Self {
        Self {
            operator_id,
            display_name,
        }
    }

    /// Returns the operator's unique identifier.
    #[must_use]
    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    /// Returns the operator's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
