pub mod grid;
#[cfg(test)]
pub mod simple_golf;
