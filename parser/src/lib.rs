//! A parser for the configuration language of input-analyzer, a keyboard and mouse tester, along
//! with the key code tables shared by the analyzer and its simulator.

pub mod cfg;
pub mod keys;
