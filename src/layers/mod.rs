//! Station markers: icon policy, marker records and the keyed marker layer.

pub mod icon;
pub mod manager;
pub mod marker;
