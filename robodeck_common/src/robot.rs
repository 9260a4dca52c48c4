//! Board enumerations.
//!
//! Every enumeration maps a closed set of names onto the small `u8` codes the
//! controller board uses on the wire. Raw codes enter through `from_u8`, which
//! returns `None` for anything outside the member set.

pub mod device;
pub mod status;
pub mod task;
