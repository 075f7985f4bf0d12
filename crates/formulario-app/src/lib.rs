// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod model;
pub mod schema;
pub mod state;
pub mod values;

pub use model::*;
pub use schema::*;
pub use state::*;
pub use values::*;
