pub mod shutdown;

#[cfg(test)]
pub(crate) mod testing;

pub use shutdown::*;
