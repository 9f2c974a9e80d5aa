#![allow(dead_code)]

pub mod domain_gens;
