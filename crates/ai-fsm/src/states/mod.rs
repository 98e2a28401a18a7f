//! One module per behavior state, each exporting its `{enter, execute, exit}` table entry.

pub(crate) mod attack;
pub(crate) mod chase;
pub(crate) mod flee;
pub(crate) mod hurt;
pub(crate) mod idle;
pub(crate) mod patrol;
