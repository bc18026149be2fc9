//! Compiler argument construction for verdict.
//!
//! Pure builders: nothing in this crate touches the filesystem, spawns a
//! process, or reads the environment. Argument order is fixed — reproducing
//! it byte for byte is part of the contract with the external build tools.

pub mod invoke;
pub mod policy;

pub use invoke::{CargoCommand, CompileInvocation, RustcCommand};
