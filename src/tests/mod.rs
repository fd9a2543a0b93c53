#[cfg(test)]
pub mod common;

#[cfg(test)]
mod exchange_flow;
