//! Administrative handlers (SuperAdmin only).

pub mod users;
