#![allow(dead_code)]

pub mod station_server;
