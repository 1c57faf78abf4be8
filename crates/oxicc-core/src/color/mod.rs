//! Color coordinates used by profile metadata
//!
//! Named color entries carry their PCS value either as L*a*b* or XYZ,
//! so only those two spaces and the D50 illuminant live here.

pub mod lab;
pub mod xyz;

pub use lab::Lab;
pub use xyz::{D50, Xyz};
