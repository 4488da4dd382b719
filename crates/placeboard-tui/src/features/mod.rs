//! Screen features. Each owns its state and render function; key handling
//! lives in the reducer.

pub mod dashboard;
pub mod salary;
pub mod toast;
